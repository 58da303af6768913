use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct AddTaskFormProps {
  pub on_add: Callback<String>
}

#[function_component(AddTaskForm)]
pub fn add_task_form(
  props: &AddTaskFormProps
) -> Html {
  let draft = use_state(String::new);

  let oninput = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        draft.set(input.value());
      }
    )
  };

  let onsubmit = {
    let draft = draft.clone();
    let on_add = props.on_add.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let name = (*draft).clone();
        if !name.trim().is_empty() {
          draft.set(String::new());
        }
        on_add.emit(name);
      }
    )
  };

  html! {
      <form class="input-group mb-3" {onsubmit}>
          <input
              class="form-control"
              type="text"
              placeholder="What needs to be done?"
              value={(*draft).clone()}
              {oninput}
          />
          <button class="btn btn-primary" type="submit">
              <i class="fas fa-plus"></i>{ " Add" }
          </button>
      </form>
  }
}
