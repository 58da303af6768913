use std::cell::Cell;
use std::rc::Rc;

use gloo::file::{
  Blob,
  ObjectUrl
};
use gloo::timers::future::TimeoutFuture;
use ticklist_core::{
  Frontend,
  Notification,
  Snapshot
};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;
use yew::{
  Reducible,
  UseReducerDispatcher,
  UseStateSetter
};

const TOAST_LIFETIME_MS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
  pub id:           u64,
  pub notification: Notification
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastStack {
  pub toasts: Vec<Toast>
}

pub enum ToastAction {
  Push(Toast),
  Dismiss(u64)
}

impl Reducible for ToastStack {
  type Action = ToastAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut toasts = self.toasts.clone();
    match action {
      | ToastAction::Push(toast) => {
        toasts.push(toast)
      }
      | ToastAction::Dismiss(id) => {
        toasts.retain(|toast| toast.id != id)
      }
    }
    Rc::new(Self { toasts })
  }
}

/// Browser side of the controller: state setters for the view, toasts
/// that dismiss themselves, native confirm dialogs and Blob downloads.
pub struct WebFrontend {
  snapshot: UseStateSetter<Snapshot>,
  toasts:   UseReducerDispatcher<ToastStack>,
  next_id:  Cell<u64>
}

impl WebFrontend {
  pub fn new(
    snapshot: UseStateSetter<Snapshot>,
    toasts: UseReducerDispatcher<ToastStack>
  ) -> Self {
    Self {
      snapshot,
      toasts,
      next_id: Cell::new(0)
    }
  }
}

impl Frontend for WebFrontend {
  fn render(&self, snapshot: &Snapshot) {
    self.snapshot.set(snapshot.clone());
  }

  fn notify(
    &self,
    notification: Notification
  ) {
    let id = self.next_id.get();
    self.next_id.set(id + 1);
    tracing::debug!(id, level = %notification.level, message = %notification.message, "toast");

    self.toasts.dispatch(
      ToastAction::Push(Toast {
        id,
        notification
      })
    );

    let toasts = self.toasts.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        TimeoutFuture::new(
          TOAST_LIFETIME_MS
        )
        .await;
        toasts.dispatch(
          ToastAction::Dismiss(id)
        );
      }
    );
  }

  fn confirm(
    &self,
    prompt: &str
  ) -> bool {
    gloo::dialogs::confirm(prompt)
  }

  fn save_export(
    &self,
    file_name: &str,
    contents: &str
  ) -> Result<(), String> {
    download(
      file_name,
      contents,
      "application/json"
    )
  }
}

/// Offers `contents` as a file download through a temporary anchor.
fn download(
  file_name: &str,
  contents: &str,
  mime: &str
) -> Result<(), String> {
  let blob = Blob::new_with_options(
    contents,
    Some(mime)
  );
  let url = ObjectUrl::from(blob);

  let document = gloo::utils::document();
  let anchor = document
    .create_element("a")
    .map_err(|err| format!("{err:?}"))?
    .dyn_into::<HtmlAnchorElement>()
    .map_err(|_| {
      "anchor element has unexpected \
       type"
        .to_string()
    })?;
  anchor.set_href(&url);
  anchor.set_download(file_name);
  anchor.click();

  // The object URL is revoked on drop.
  wasm_bindgen_futures::spawn_local(
    async move {
      TimeoutFuture::new(1_000).await;
      drop(url);
    }
  );
  Ok(())
}
