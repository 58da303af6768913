use ticklist_core::TaskFilter;
use ticklist_core::drag::RowBounds;
use ticklist_core::view::ListView;
use wasm_bindgen::JsCast;
use web_sys::{
  DragEvent,
  Element
};
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  function_component,
  html,
  use_node_ref
};

use super::{
  RowActions,
  TaskRowView
};

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:         ListView,
  pub actions:      RowActions,
  pub on_drag_over:
    Callback<(f64, Vec<RowBounds>)>,
  pub on_drop:      Callback<()>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let list_ref = use_node_ref();

  let ondragover = {
    let list_ref = list_ref.clone();
    let on_drag_over =
      props.on_drag_over.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        let rows = row_bounds(&list_ref);
        on_drag_over.emit((
          f64::from(event.client_y()),
          rows
        ));
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        on_drop.emit(());
      }
    )
  };

  if props.view.is_empty() {
    return html! {
        <div class="empty-state">
            <i class="fas fa-clipboard-list fa-2x mb-2"></i>
            <div>{ empty_message(props.view.filter) }</div>
        </div>
    };
  }

  html! {
      <div class="card" ref={list_ref} {ondragover} {ondrop}>
          {
              for props.view.rows.iter().cloned().map(|row| html! {
                  <TaskRowView
                      key={row.uuid.to_string()}
                      row={row.clone()}
                      actions={props.actions.clone()}
                  />
              })
          }
      </div>
  }
}

/// Reads the current on-screen geometry of every rendered row, top to
/// bottom.
fn row_bounds(
  list_ref: &NodeRef
) -> Vec<RowBounds> {
  let Some(list) =
    list_ref.cast::<Element>()
  else {
    return Vec::new();
  };
  let Ok(nodes) =
    list.query_selector_all("[data-uuid]")
  else {
    return Vec::new();
  };

  (0..nodes.length())
    .filter_map(|idx| nodes.item(idx))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .filter_map(|element| {
      let uuid = element
        .get_attribute("data-uuid")?;
      let rect = element
        .get_bounding_client_rect();
      Some(RowBounds::new(
        uuid,
        rect.top(),
        rect.height()
      ))
    })
    .collect()
}

fn empty_message(
  filter: TaskFilter
) -> &'static str {
  match filter {
    | TaskFilter::All => {
      "No tasks yet. Add one above."
    }
    | TaskFilter::Active => {
      "No active tasks."
    }
    | TaskFilter::Completed => {
      "No completed tasks."
    }
  }
}
