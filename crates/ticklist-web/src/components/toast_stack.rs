use yew::{
  Html,
  Properties,
  function_component,
  html
};

use crate::frontend::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
  pub toasts: Vec<Toast>
}

#[function_component(ToastStackView)]
pub fn toast_stack_view(
  props: &ToastStackProps
) -> Html {
  html! {
      <div class="toast-stack">
          {
              for props.toasts.iter().map(|toast| {
                  let level = toast.notification.level;
                  let style = format!("background: {};", level.color());
                  html! {
                      <div key={toast.id.to_string()} class="toast-item" role="alert" {style}>
                          <i class={format!("fas fa-{} me-2", level.icon())}></i>
                          { &toast.notification.message }
                      </div>
                  }
              })
          }
      </div>
  }
}
