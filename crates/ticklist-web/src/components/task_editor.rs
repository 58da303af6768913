use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  KeyboardEvent,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_node_ref,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TaskEditorProps {
  pub initial:   String,
  pub on_input:  Callback<String>,
  pub on_save:   Callback<()>,
  pub on_cancel: Callback<()>
}

/// Inline rename field. Enter saves, Escape cancels.
#[function_component(TaskEditor)]
pub fn task_editor(
  props: &TaskEditorProps
) -> Html {
  let draft = {
    let initial = props.initial.clone();
    use_state(move || initial)
  };
  let input_ref = use_node_ref();

  {
    let input_ref = input_ref.clone();
    use_effect_with((), move |_| {
      if let Some(input) =
        input_ref.cast::<HtmlInputElement>()
      {
        let _ = input.focus();
        input.select();
      }
      || ()
    });
  }

  let oninput = {
    let draft = draft.clone();
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        let value = input.value();
        on_input.emit(value.clone());
        draft.set(value);
      }
    )
  };

  let onkeydown = {
    let on_save = props.on_save.clone();
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |event: KeyboardEvent| {
        match event.key().as_str() {
          | "Enter" => {
            event.prevent_default();
            on_save.emit(());
          }
          | "Escape" => {
            on_cancel.emit(())
          }
          | _ => {}
        }
      }
    )
  };

  let on_save = props.on_save.clone();
  let on_cancel = props.on_cancel.clone();

  html! {
      <div class="input-group input-group-sm flex-grow-1">
          <input
              ref={input_ref}
              class="form-control"
              type="text"
              value={(*draft).clone()}
              {oninput}
              {onkeydown}
          />
          <button class="btn btn-success" title="Save" onclick={move |_| on_save.emit(())}>
              <i class="fas fa-check"></i>
          </button>
          <button class="btn btn-outline-secondary" title="Cancel" onclick={move |_| on_cancel.emit(())}>
              <i class="fas fa-times"></i>
          </button>
      </div>
  }
}
