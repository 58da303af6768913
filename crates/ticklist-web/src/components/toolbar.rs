use web_sys::{
  File,
  HtmlInputElement
};
use yew::{
  Callback,
  Event,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
  pub on_clear_completed:
    Callback<MouseEvent>,
  pub on_export: Callback<MouseEvent>,
  pub on_import: Callback<File>,
  pub on_exit:   Callback<MouseEvent>
}

#[function_component(Toolbar)]
pub fn toolbar(
  props: &ToolbarProps
) -> Html {
  let file_ref = use_node_ref();

  let open_picker = {
    let file_ref = file_ref.clone();
    Callback::from(move |_: MouseEvent| {
      if let Some(input) =
        file_ref.cast::<HtmlInputElement>()
      {
        input.click();
      }
    })
  };

  let onchange = {
    let on_import =
      props.on_import.clone();
    Callback::from(move |event: Event| {
      let input: HtmlInputElement =
        event.target_unchecked_into();
      if let Some(file) = input
        .files()
        .and_then(|files| files.get(0))
      {
        on_import.emit(file);
      }
      // Allows picking the same file twice in a row.
      input.set_value("");
    })
  };

  html! {
      <div class="d-flex flex-wrap gap-2 mt-3">
          <button class="btn btn-outline-danger" onclick={props.on_clear_completed.clone()}>
              <i class="fas fa-broom"></i>{ " Clear completed" }
          </button>
          <button class="btn btn-outline-primary" onclick={props.on_export.clone()}>
              <i class="fas fa-file-export"></i>{ " Export" }
          </button>
          <button class="btn btn-outline-primary" onclick={open_picker}>
              <i class="fas fa-file-import"></i>{ " Import" }
          </button>
          <input
              ref={file_ref}
              type="file"
              accept=".json,application/json"
              class="d-none"
              {onchange}
          />
          <button class="btn btn-outline-secondary ms-auto" onclick={props.on_exit.clone()}>
              <i class="fas fa-sign-out-alt"></i>{ " Exit" }
          </button>
      </div>
  }
}
