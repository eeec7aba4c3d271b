//! Generated Fill-In Form
//!
//! Scans a text for unresolved placeholders and renders one control per
//! token: select/radio/checkbox/multi for variables (server-side or local),
//! a radio row for inline option groups, free text for `$` measurements.
//! Fields left untouched keep their tokens verbatim in the text.

use std::ops::Range;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::localvar;
use crate::models::{ControlKind, LocalVariable, Variable, VariableValue};
use crate::substitution::{self, TokenKind};

#[derive(Clone, PartialEq)]
pub enum FieldKind {
    Variable(Variable),
    Local(LocalVariable),
    OptionGroup(Vec<String>),
    Measurement,
}

#[derive(Clone, PartialEq)]
pub struct FormField {
    pub range: Range<usize>,
    pub kind: FieldKind,
}

/// Build form fields for every resolvable placeholder in `text`.
///
/// `{Name}` tokens whose title matches no known variable produce no field
/// and stay verbatim in the text.
pub fn build_fields(
    text: &str,
    lookup: impl Fn(&str) -> Option<Variable>,
) -> Vec<FormField> {
    let mut fields: Vec<FormField> = substitution::scan(text)
        .into_iter()
        .filter_map(|token| {
            let kind = match token.kind {
                TokenKind::Variable(name) => FieldKind::Variable(lookup(&name)?),
                TokenKind::OptionGroup(options) => FieldKind::OptionGroup(options),
                TokenKind::Measurement => FieldKind::Measurement,
            };
            Some(FormField {
                range: token.range,
                kind,
            })
        })
        .collect();

    for (range, def) in localvar::marker_ranges(text) {
        fields.push(FormField {
            range,
            kind: FieldKind::Local(def),
        });
    }
    fields.sort_by_key(|f| f.range.start);
    fields
}

/// Resolve one field against what the user selected; `None` leaves the
/// token untouched.
fn resolve_field(field: &FormField, selected: &[String]) -> Option<String> {
    if selected.is_empty() {
        return None;
    }
    match &field.kind {
        FieldKind::Variable(variable) => Some(substitution::resolve_variable(variable, selected)),
        FieldKind::Local(def) => {
            let delimiter = def.delimitador.as_deref().unwrap_or(", ");
            let last = def.ultimoDelimitador.as_deref().unwrap_or(delimiter);
            Some(substitution::join_values(selected, delimiter, last))
        }
        FieldKind::OptionGroup(_) | FieldKind::Measurement => Some(selected[0].clone()),
    }
}

#[component]
pub fn VariableForm(
    fields: Vec<FormField>,
    #[prop(into)] on_apply: Callback<Vec<(Range<usize>, Option<String>)>>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let selections = RwSignal::new(vec![Vec::<String>::new(); fields.len()]);
    let fields_for_apply = fields.clone();

    let apply = move |_| {
        let selected = selections.get();
        let answers: Vec<(Range<usize>, Option<String>)> = fields_for_apply
            .iter()
            .enumerate()
            .map(|(i, field)| (field.range.clone(), resolve_field(field, &selected[i])))
            .collect();
        on_apply.run(answers);
    };

    view! {
        <div class="variable-form">
            <div class="variable-form-header">
                <span class="variable-form-title">"Preencher campos"</span>
                <button class="close-btn" on:click=move |_| on_cancel.run(())>"×"</button>
            </div>

            {fields.into_iter().enumerate().map(|(idx, field)| {
                render_field(idx, field, selections)
            }).collect_view()}

            <div class="variable-form-actions">
                <button class="apply-btn" on:click=apply>"Aplicar"</button>
            </div>
        </div>
    }
}

fn render_field(idx: usize, field: FormField, selections: RwSignal<Vec<Vec<String>>>) -> AnyView {
    let set_single = move |value: String| {
        selections.update(|s| {
            s[idx] = if value.is_empty() { Vec::new() } else { vec![value] }
        });
    };
    let toggle = move |value: String| {
        selections.update(|s| {
            if let Some(pos) = s[idx].iter().position(|v| v == &value) {
                s[idx].remove(pos);
            } else {
                s[idx].push(value);
            }
        });
    };

    match field.kind {
        FieldKind::Variable(variable) => {
            let label = variable.title.clone();
            let control = variable.control;
            let values = variable.values.clone();
            view! {
                <div class="form-field">
                    <label class="field-label">{label}</label>
                    {value_controls(idx, control, values, set_single, toggle)}
                </div>
            }
            .into_any()
        }
        FieldKind::Local(def) => {
            let label = def.display_label().to_string();
            view! {
                <div class="form-field">
                    <label class="field-label">{label}</label>
                    {value_controls(idx, def.controle, def.valores, set_single, toggle)}
                </div>
            }
            .into_any()
        }
        FieldKind::OptionGroup(options) => {
            let name = format!("field-{}", idx);
            view! {
                <div class="form-field">
                    <label class="field-label">"Opções"</label>
                    <div class="option-row">
                        {options.into_iter().map(|option| {
                            let value = option.clone();
                            let name = name.clone();
                            view! {
                                <label class="option-label">
                                    <input
                                        type="radio"
                                        name=name
                                        on:change=move |_| set_single(value.clone())
                                    />
                                    {option}
                                </label>
                            }
                        }).collect_view()}
                    </div>
                </div>
            }
            .into_any()
        }
        FieldKind::Measurement => view! {
            <div class="form-field">
                <label class="field-label">"Medida"</label>
                <input
                    type="text"
                    class="measurement-input"
                    placeholder="ex: 9,8"
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_single(input.value());
                    }
                />
            </div>
        }
        .into_any(),
    }
}

fn value_controls(
    idx: usize,
    control: ControlKind,
    values: Vec<VariableValue>,
    set_single: impl Fn(String) + Copy + 'static,
    toggle: impl Fn(String) + Copy + 'static,
) -> AnyView {
    match control {
        // Checkbox and multiselect share the toggle behavior
        kind if kind.is_multi() => view! {
            <div class="option-row">
                {values.into_iter().map(|v| {
                    let value = v.value.clone();
                    view! {
                        <label class="option-label">
                            <input
                                type="checkbox"
                                on:change=move |_| toggle(value.clone())
                            />
                            {v.description}
                        </label>
                    }
                }).collect_view()}
            </div>
        }
        .into_any(),
        ControlKind::SingleSelect => view! {
            <select
                class="field-select"
                on:change=move |ev| {
                    let target = ev.target().unwrap();
                    let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                    set_single(select.value());
                }
            >
                <option value="">"—"</option>
                {values.into_iter().map(|v| view! {
                    <option value=v.value.clone()>{v.description}</option>
                }).collect_view()}
            </select>
        }
        .into_any(),
        _ => {
            let name = format!("field-{}", idx);
            view! {
                <div class="option-row">
                    {values.into_iter().map(|v| {
                        let value = v.value.clone();
                        let name = name.clone();
                        view! {
                            <label class="option-label">
                                <input
                                    type="radio"
                                    name=name
                                    on:change=move |_| set_single(value.clone())
                                />
                                {v.description}
                            </label>
                        }
                    }).collect_view()}
                </div>
            }
            .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ControlKind;

    fn known_variable(title: &str) -> Option<Variable> {
        (title == "Ecotextura").then(|| Variable {
            id: 1,
            title: title.to_string(),
            control: ControlKind::SingleSelect,
            values: vec![VariableValue {
                description: "homogênea".into(),
                value: "homogênea".into(),
            }],
            delimiter: None,
            last_delimiter: None,
        })
    }

    #[test]
    fn test_build_fields_skips_unknown_variables() {
        let fields = build_fields("{Ecotextura} e {Desconhecida} com $", known_variable);
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields[0].kind, FieldKind::Variable(_)));
        assert!(matches!(fields[1].kind, FieldKind::Measurement));
    }

    #[test]
    fn test_build_fields_includes_local_markers_in_order() {
        let text = r#"{Ecotextura} x {"tipo":"variavelLocal","controle":"radio","titulo":"Lado","valores":[]}"#;
        let fields = build_fields(text, known_variable);
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields[0].kind, FieldKind::Variable(_)));
        assert!(matches!(fields[1].kind, FieldKind::Local(_)));
        assert!(fields[0].range.start < fields[1].range.start);
    }

    #[test]
    fn test_resolve_field_empty_selection_is_none() {
        let fields = build_fields("{Ecotextura}", known_variable);
        assert_eq!(resolve_field(&fields[0], &[]), None);
    }

    #[test]
    fn test_resolve_local_uses_its_delimiters() {
        let def = LocalVariable {
            tipo: "variavelLocal".into(),
            controle: ControlKind::CheckboxGroup,
            titulo: "Achados".into(),
            valores: vec![],
            label: None,
            delimitador: Some("; ".into()),
            ultimoDelimitador: Some(" e ".into()),
        };
        let field = FormField {
            range: 0..1,
            kind: FieldKind::Local(def),
        };
        let selected: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(resolve_field(&field, &selected), Some("a; b e c".into()));
    }
}
