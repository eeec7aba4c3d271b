//! Dictation
//!
//! Wrapper over the browser SpeechRecognition API: a continuous session
//! whose recognized fragments are batched by a restartable silence debounce
//! before being handed to the editor. The session auto-restarts on an
//! unexpected `end` unless the stop was user-initiated.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{SpeechRecognition, SpeechRecognitionError as SpeechRecognitionErrorEvent, SpeechRecognitionEvent};

/// Silence window before the buffered speech is flushed to the editor
const SILENCE_DEBOUNCE_MS: u32 = 2_000;

struct Inner {
    recognition: SpeechRecognition,
    buffer: String,
    debounce: Option<Timeout>,
    /// Set when the stop came from the user, suppressing the auto-restart
    stopping: bool,
    active: bool,
}

#[derive(Clone)]
pub struct Dictation {
    inner: Rc<RefCell<Inner>>,
    on_text: Rc<dyn Fn(String)>,
    on_error: Rc<dyn Fn(String)>,
}

impl Dictation {
    /// Fails on browsers without the SpeechRecognition API.
    pub fn new(
        on_text: impl Fn(String) + 'static,
        on_error: impl Fn(String) + 'static,
    ) -> Result<Self, String> {
        let recognition = SpeechRecognition::new()
            .map_err(|_| "reconhecimento de voz não suportado neste navegador".to_string())?;
        recognition.set_lang("pt-BR");
        recognition.set_continuous(true);
        recognition.set_interim_results(false);

        let dictation = Self {
            inner: Rc::new(RefCell::new(Inner {
                recognition,
                buffer: String::new(),
                debounce: None,
                stopping: false,
                active: false,
            })),
            on_text: Rc::new(on_text),
            on_error: Rc::new(on_error),
        };
        dictation.bind_handlers();
        Ok(dictation)
    }

    fn bind_handlers(&self) {
        let this = self.clone();
        let onresult = Closure::<dyn FnMut(SpeechRecognitionEvent)>::new(
            move |ev: SpeechRecognitionEvent| this.handle_result(ev),
        );
        let this = self.clone();
        let onend =
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| this.handle_end());
        let this = self.clone();
        let onerror = Closure::<dyn FnMut(SpeechRecognitionErrorEvent)>::new(
            move |ev: SpeechRecognitionErrorEvent| (this.on_error)(describe_error(&ev)),
        );

        let inner = self.inner.borrow();
        inner
            .recognition
            .set_onresult(Some(onresult.as_ref().unchecked_ref()));
        inner
            .recognition
            .set_onend(Some(onend.as_ref().unchecked_ref()));
        inner
            .recognition
            .set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onresult.forget();
        onend.forget();
        onerror.forget();
    }

    fn handle_result(&self, ev: SpeechRecognitionEvent) {
        if let Some(results) = ev.results() {
            let mut inner = self.inner.borrow_mut();
            for i in ev.result_index()..results.length() {
                let Some(result) = results.get(i) else { continue };
                if !result.is_final() {
                    continue;
                }
                if let Some(alternative) = result.get(0) {
                    let transcript = alternative.transcript();
                    let fragment = transcript.trim();
                    if fragment.is_empty() {
                        continue;
                    }
                    if !inner.buffer.is_empty() {
                        inner.buffer.push(' ');
                    }
                    inner.buffer.push_str(fragment);
                }
            }
        }
        // Every new fragment cancels and restarts the silence timer
        self.restart_debounce();
    }

    fn restart_debounce(&self) {
        let this = self.clone();
        let timeout = Timeout::new(SILENCE_DEBOUNCE_MS, move || this.flush());
        let mut inner = self.inner.borrow_mut();
        if let Some(previous) = inner.debounce.take() {
            previous.cancel();
        }
        inner.debounce = Some(timeout);
    }

    fn flush(&self) {
        let text = {
            let mut inner = self.inner.borrow_mut();
            inner.debounce = None;
            std::mem::take(&mut inner.buffer)
        };
        if !text.is_empty() {
            (self.on_text)(text);
        }
    }

    fn handle_end(&self) {
        let restart = {
            let mut inner = self.inner.borrow_mut();
            if inner.stopping {
                inner.stopping = false;
                inner.active = false;
                false
            } else {
                inner.active
            }
        };
        if restart {
            let _ = self.inner.borrow().recognition.start();
        }
    }

    pub fn start(&self) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.stopping = false;
        inner.active = true;
        inner
            .recognition
            .start()
            .map_err(|_| "não foi possível iniciar o microfone".to_string())
    }

    /// User-initiated stop; flushes whatever is buffered first.
    pub fn stop(&self) {
        self.flush();
        let mut inner = self.inner.borrow_mut();
        inner.stopping = true;
        inner.active = false;
        inner.recognition.stop();
    }
}

fn describe_error(ev: &SpeechRecognitionErrorEvent) -> String {
    use web_sys::SpeechRecognitionErrorCode as Code;
    match ev.error() {
        Code::NotAllowed | Code::ServiceNotAllowed => {
            "permissão de microfone negada".to_string()
        }
        Code::AudioCapture => "nenhum microfone disponível".to_string(),
        Code::Network => "falha de rede no reconhecimento de voz".to_string(),
        Code::NoSpeech => "nenhuma fala detectada".to_string(),
        other => format!("erro de reconhecimento de voz: {:?}", other),
    }
}
