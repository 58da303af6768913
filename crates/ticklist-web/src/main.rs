mod app;
mod components;
mod frontend;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting ticklist web frontend"
  );

  let window = web_sys::window()
    .expect("missing global window");

  // The task server also serves this page.
  let base_url = window
    .location()
    .origin()
    .unwrap_or_else(|_| {
      "http://localhost:8000".to_string()
    });

  let mount = window
    .document()
    .and_then(|document| {
      document.get_element_by_id("app")
    })
    .expect(
      "missing #app mount element"
    );

  yew::Renderer::<app::App>::with_root_and_props(
    mount,
    app::AppProps {
      base_url: base_url.into()
    }
  )
  .render();
}
