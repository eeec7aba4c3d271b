//! Insertion Mode Modal
//!
//! Shown when a phrase has no usable substitution anchor: the user picks
//! where the text should land. Click-dependent modes become one-shot
//! pending states in the composer.

use leptos::prelude::*;

use crate::insertion::InsertMode;

const MODES: &[(InsertMode, &str)] = &[
    (InsertMode::Append, "No final do laudo"),
    (InsertMode::ClickPoint, "Clicar onde inserir"),
    (InsertMode::AtCursor, "Na posição do cursor"),
    (InsertMode::ReplaceSelection, "Substituir a seleção"),
    (InsertMode::ReplaceLine, "Substituir a linha atual"),
];

#[component]
pub fn InsertionModal(
    phrase_title: String,
    #[prop(into)] on_pick: Callback<InsertMode>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <div class="modal insertion-modal">
                <div class="modal-header">
                    <span class="modal-title">{format!("Inserir \"{}\"", phrase_title)}</span>
                    <button class="close-btn" on:click=move |_| on_cancel.run(())>"×"</button>
                </div>
                <div class="mode-list">
                    {MODES.iter().map(|(mode, label)| {
                        let mode = *mode;
                        view! {
                            <button class="mode-btn" on:click=move |_| on_pick.run(mode)>
                                {*label}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}
