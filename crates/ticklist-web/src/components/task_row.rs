use ticklist_core::view::TaskRow;
use ticklist_core::{
  Direction,
  TaskId
};
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

use super::TaskEditor;

/// Everything a row can ask the controller to do.
#[derive(Clone, PartialEq)]
pub struct RowActions {
  pub on_select:     Callback<TaskId>,
  pub on_toggle:     Callback<TaskId>,
  pub on_delete:     Callback<TaskId>,
  pub on_move:
    Callback<(TaskId, Direction)>,
  pub on_begin_edit: Callback<TaskId>,
  pub on_edit_input: Callback<String>,
  pub on_save_edit:  Callback<()>,
  pub on_cancel_edit: Callback<()>,
  pub on_drag_start: Callback<TaskId>,
  pub on_drag_end:   Callback<()>
}

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub row:     TaskRow,
  pub actions: RowActions
}

#[function_component(TaskRowView)]
pub fn task_row_view(
  props: &TaskRowProps
) -> Html {
  let row = &props.row;
  let actions = &props.actions;
  let uuid = row.uuid.clone();

  let emit_with = |callback: &Callback<TaskId>| {
    let callback = callback.clone();
    let uuid = uuid.clone();
    Callback::from(move |event: MouseEvent| {
      event.stop_propagation();
      callback.emit(uuid.clone());
    })
  };

  let move_with = |direction: Direction| {
    let on_move = actions.on_move.clone();
    let uuid = uuid.clone();
    Callback::from(move |event: MouseEvent| {
      event.stop_propagation();
      on_move.emit((uuid.clone(), direction));
    })
  };

  let ondragstart = {
    let on_drag_start =
      actions.on_drag_start.clone();
    let uuid = uuid.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          if let Err(err) = data_transfer
            .set_data("text/plain", uuid.as_str())
          {
            tracing::debug!(?err, "drag data not set");
          }
          data_transfer.set_effect_allowed("move");
        }
        on_drag_start.emit(uuid.clone());
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      actions.on_drag_end.clone();
    Callback::from(move |_: DragEvent| {
      on_drag_end.emit(())
    })
  };

  let body = match &row.editing {
    | Some(draft) => {
      html! {
          <TaskEditor
              initial={draft.clone()}
              on_input={actions.on_edit_input.clone()}
              on_save={actions.on_save_edit.clone()}
              on_cancel={actions.on_cancel_edit.clone()}
          />
      }
    }
    | None => {
      let ondblclick =
        emit_with(&actions.on_begin_edit);
      html! {
          <div class="task-name" title="Double-click to edit" {ondblclick}>
              <div>{ &row.name }</div>
              <div class="task-created">{ &row.created_label }</div>
          </div>
      }
    }
  };

  html! {
      <div
          class={classes!(
              "task-row",
              row.active.then_some("active"),
              row.completed.then_some("completed"),
              row.dragging.then_some("dragging"),
          )}
          data-uuid={row.uuid.to_string()}
          onclick={emit_with(&actions.on_select)}
      >
          <span class="drag-handle" draggable="true" title="Drag to reorder" {ondragstart} {ondragend}>
              <i class="fas fa-grip-vertical"></i>
          </span>
          <input
              class="form-check-input"
              type="checkbox"
              checked={row.completed}
              onclick={emit_with(&actions.on_toggle)}
          />
          { body }
          <div class="btn-group btn-group-sm">
              <button class="btn btn-outline-secondary" title="Edit" onclick={emit_with(&actions.on_begin_edit)}>
                  <i class="fas fa-pen"></i>
              </button>
              <button class="btn btn-outline-secondary" title="Move up" onclick={move_with(Direction::Up)}>
                  <i class="fas fa-arrow-up"></i>
              </button>
              <button class="btn btn-outline-secondary" title="Move down" onclick={move_with(Direction::Down)}>
                  <i class="fas fa-arrow-down"></i>
              </button>
              <button class="btn btn-outline-danger" title="Delete" onclick={emit_with(&actions.on_delete)}>
                  <i class="fas fa-trash"></i>
              </button>
          </div>
      </div>
  }
}
