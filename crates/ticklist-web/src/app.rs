use std::future::Future;
use std::rc::Rc;

use gloo::events::EventListener;
use ticklist_core::drag::RowBounds;
use ticklist_core::{
  Direction,
  Frontend,
  HttpTaskApi,
  Notification,
  Snapshot,
  TaskFilter,
  TaskId,
  TaskListController
};
use web_sys::{
  File,
  MouseEvent
};
use yew::{
  AttrValue,
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer,
  use_state
};

use crate::components::{
  AddTaskForm,
  FilterTabs,
  RowActions,
  StatsPanel,
  TaskList,
  ToastStackView,
  Toolbar
};
use crate::frontend::{
  ToastStack,
  WebFrontend
};

type WebController = TaskListController<
  HttpTaskApi,
  WebFrontend
>;

#[derive(Properties, PartialEq)]
pub struct AppProps {
  pub base_url: AttrValue
}

/// Callback that runs an async controller operation on the local
/// executor.
fn spawn_action<T, F, Fut>(
  controller: &Rc<WebController>,
  run: F
) -> Callback<T>
where
  T: 'static,
  F: Fn(Rc<WebController>, T) -> Fut
    + 'static,
  Fut: Future<Output = ()> + 'static
{
  let controller = controller.clone();
  Callback::from(move |arg: T| {
    wasm_bindgen_futures::spawn_local(
      run(controller.clone(), arg)
    );
  })
}

fn sync_action<T, F>(
  controller: &Rc<WebController>,
  run: F
) -> Callback<T>
where
  T: 'static,
  F: Fn(&WebController, T) + 'static
{
  let controller = controller.clone();
  Callback::from(move |arg: T| {
    run(&controller, arg)
  })
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
  let snapshot =
    use_state(Snapshot::default);
  let toasts =
    use_reducer(ToastStack::default);
  let exited = use_state(|| false);

  let controller = {
    let setter = snapshot.setter();
    let dispatcher = toasts.dispatcher();
    use_memo(
      props.base_url.clone(),
      move |base_url| {
        HttpTaskApi::new(base_url.as_str())
          .map(|api| {
            Rc::new(
              TaskListController::new(
                api,
                WebFrontend::new(
                  setter, dispatcher
                )
              )
            )
          })
          .map_err(|err| err.to_string())
      }
    )
  };

  {
    let controller = controller.clone();
    use_effect_with((), move |_| {
      let listener = match &*controller {
        | Ok(controller) => {
          let loader = controller.clone();
          wasm_bindgen_futures::spawn_local(
            async move {
              loader.load_tasks().await;
            }
          );

          let on_unload =
            controller.clone();
          Some(EventListener::new(
            &gloo::utils::window(),
            "beforeunload",
            move |_| {
              let controller =
                on_unload.clone();
              wasm_bindgen_futures::spawn_local(
                async move {
                  controller
                    .shutdown_server()
                    .await;
                }
              );
            }
          ))
        }
        | Err(err) => {
          tracing::error!(error = %err, "cannot build API client");
          None
        }
      };
      move || drop(listener)
    });
  }

  let controller = match &*controller {
    | Ok(controller) => controller.clone(),
    | Err(err) => {
      return html! {
          <div class="todo-shell alert alert-danger">
              { format!("Cannot reach the task server: {err}") }
          </div>
      };
    }
  };

  if *exited {
    return html! {
        <div class="todo-shell empty-state">
            <i class="fas fa-power-off fa-2x mb-2"></i>
            <div>{ "The server has been shut down. You can close this tab." }</div>
        </div>
    };
  }

  let on_add = spawn_action(
    &controller,
    |c, name: String| async move {
      c.add_task(&name).await;
    }
  );

  let on_filter = sync_action(
    &controller,
    |c, filter: TaskFilter| {
      c.set_filter(filter)
    }
  );

  let actions = RowActions {
    on_select:      sync_action(
      &controller,
      |c, uuid: TaskId| {
        c.set_active_task(&uuid)
      }
    ),
    on_toggle:      spawn_action(
      &controller,
      |c, uuid: TaskId| async move {
        c.toggle_completed(&uuid).await;
      }
    ),
    on_delete:      spawn_action(
      &controller,
      |c, uuid: TaskId| async move {
        c.delete_task(&uuid).await;
      }
    ),
    on_move:        spawn_action(
      &controller,
      |c,
       (uuid, direction): (
        TaskId,
        Direction
      )| async move {
        c.move_task(&uuid, direction)
          .await;
      }
    ),
    on_begin_edit:  sync_action(
      &controller,
      |c, uuid: TaskId| {
        c.begin_edit(&uuid)
      }
    ),
    on_edit_input:  sync_action(
      &controller,
      |c, draft: String| {
        c.set_edit_draft(&draft)
      }
    ),
    on_save_edit:   spawn_action(
      &controller,
      |c, (): ()| async move {
        c.save_edit().await;
      }
    ),
    on_cancel_edit: sync_action(
      &controller,
      |c, (): ()| c.cancel_edit()
    ),
    on_drag_start:  sync_action(
      &controller,
      |c, uuid: TaskId| {
        c.begin_drag(&uuid)
      }
    ),
    on_drag_end:    spawn_action(
      &controller,
      |c, (): ()| async move {
        c.end_drag().await;
      }
    )
  };

  let on_drag_over = sync_action(
    &controller,
    |c,
     (pointer_y, rows): (
      f64,
      Vec<RowBounds>
    )| {
      c.drag_over(pointer_y, &rows)
    }
  );

  let on_drop = spawn_action(
    &controller,
    |c, (): ()| async move {
      c.end_drag().await;
    }
  );

  let on_clear_completed = spawn_action(
    &controller,
    |c, _: MouseEvent| async move {
      c.clear_completed().await;
    }
  );

  let on_export = sync_action(
    &controller,
    |c, _: MouseEvent| {
      c.export_tasks();
    }
  );

  let on_import = spawn_action(
    &controller,
    |c, file: File| async move {
      let file = gloo::file::File::from(file);
      match gloo::file::futures::read_as_text(&file).await {
        | Ok(text) => {
          c.import_file(&text).await;
        }
        | Err(err) => {
          tracing::warn!(error = %err, "could not read import file");
          c.frontend().notify(
            Notification::error(format!(
              "Failed to import tasks: {err}"
            ))
          );
        }
      }
    }
  );

  let on_exit = {
    let exited = exited.setter();
    spawn_action(
      &controller,
      move |c, _: MouseEvent| {
        let exited = exited.clone();
        async move {
          if c.exit_app().await {
            exited.set(true);
            let _ = gloo::utils::window().close();
          }
        }
      }
    )
  };

  html! {
      <div class="todo-shell">
          <ToastStackView toasts={toasts.toasts.clone()} />
          <h1 class="h3 mb-3">
              <i class="fas fa-check-square me-2"></i>{ "To-Do List" }
          </h1>
          <AddTaskForm {on_add} />
          <StatsPanel stats={snapshot.stats} />
          <FilterTabs tabs={snapshot.view.tabs.clone()} on_select={on_filter} />
          <TaskList
              view={snapshot.view.clone()}
              {actions}
              {on_drag_over}
              {on_drop}
          />
          <Toolbar
              {on_clear_completed}
              {on_export}
              {on_import}
              {on_exit}
          />
      </div>
  }
}
