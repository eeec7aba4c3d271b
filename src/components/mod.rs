//! UI Components
//!
//! The top-level views and the shared widgets they compose.

mod ai_assistant;
mod editor_surface;
mod insertion_modal;
mod login;
mod phrase_editor;
mod phrase_transfer;
mod report_composer;
mod template_editor;
mod toast;
mod variable_editor;
mod variable_form;

pub use ai_assistant::AiAssistant;
pub use login::LoginView;
pub use phrase_editor::PhraseEditor;
pub use phrase_transfer::PhraseTransfer;
pub use report_composer::ReportComposer;
pub use template_editor::TemplateEditor;
pub use toast::ToastTray;
pub use variable_editor::VariableEditor;
