//! Leptos Sortable
//!
//! Mouse-based reordering for flat lists (variable values, substitution
//! pairs). Uses a movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Sort state signals
#[derive(Clone, Copy)]
pub struct SortSignals {
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    pub drop_index_read: ReadSignal<Option<usize>>,
    pub drop_index_write: WriteSignal<Option<usize>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending index (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_sort_signals() -> SortSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (drop_index_read, drop_index_write) = signal(None::<usize>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    SortSignals {
        dragging_read,
        dragging_write,
        drop_index_read,
        drop_index_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag(sort: &SortSignals) {
    sort.dragging_write.try_set(None);
    sort.drop_index_write.try_set(None);
    sort.pending_write.try_set(None);
    sort.drag_just_ended_write.try_set(true);

    if let Some(win) = web_sys::window() {
        let clear = sort.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            100,
        );
        cb.forget();
    }
}

/// Create mousedown handler for sortable rows.
/// Records a pending drag with the start position.
pub fn make_on_mousedown(sort: SortSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                    return;
                }
            }
            sort.pending_write.set(Some(index));
            sort.start_x_write.set(ev.client_x());
            sort.start_y_write.set(ev.client_y());
        }
    }
}

/// Global mousemove handler - starts the drag once moved far enough
fn bind_global_mousemove(sort: SortSignals) {
    use wasm_bindgen::closure::Closure;

    // The listener stays installed after the owning view is torn down, so
    // every signal access goes through the fallible accessors.
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = sort.pending_read.try_get_untracked() else {
            return;
        };
        let dragging = sort.dragging_read.try_get_untracked().flatten();

        if pending.is_some() && dragging.is_none() {
            let start_x = sort.start_x_read.try_get_untracked().unwrap_or(0);
            let start_y = sort.start_y_read.try_get_untracked().unwrap_or(0);
            let dx = (ev.client_x() - start_x).abs();
            let dy = (ev.client_y() - start_y).abs();

            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                sort.dragging_write.try_set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback(
                "mousemove",
                on_mousemove.as_ref().unchecked_ref(),
            );
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for rows (become the drop slot)
pub fn make_on_row_mouseenter(sort: SortSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = sort.dragging_read.get_untracked() {
            if dragging != index {
                sort.drop_index_write.set(Some(index));
            }
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(sort: SortSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if sort.dragging_read.get_untracked().is_some() {
            sort.drop_index_write.set(None);
        }
    }
}

/// Bind the global mouseup handler for drop detection
pub fn bind_global_mouseup<F>(sort: SortSignals, on_drop: F)
where
    F: Fn(usize, usize) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = sort.dragging_read.try_get_untracked().flatten();
        let drop_index = sort.drop_index_read.try_get_untracked().flatten();

        sort.pending_write.try_set(None);

        end_drag(&sort);
        if let (Some(from), Some(to)) = (dragging, drop_index) {
            on_drop(from, to);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc
                .add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(sort);
}

/// Move the element at `from` so it lands at `to`.
pub fn apply_reorder<T>(list: &mut Vec<T>, from: usize, to: usize) {
    if from >= list.len() || to >= list.len() || from == to {
        return;
    }
    let item = list.remove(from);
    list.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::apply_reorder;

    #[test]
    fn test_reorder_moves_forward_and_back() {
        let mut list = vec!["a", "b", "c", "d"];
        apply_reorder(&mut list, 0, 2);
        assert_eq!(list, vec!["b", "c", "a", "d"]);
        apply_reorder(&mut list, 2, 0);
        assert_eq!(list, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut list = vec![1, 2];
        apply_reorder(&mut list, 5, 0);
        assert_eq!(list, vec![1, 2]);
    }
}
