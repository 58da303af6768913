use ticklist_core::TaskStats;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
  pub stats: TaskStats
}

#[function_component(StatsPanel)]
pub fn stats_panel(
  props: &StatsPanelProps
) -> Html {
  let stats = props.stats;
  let cell = |label: &str, value: String| {
    html! {
        <div class="col">
            <div class="fs-4 fw-semibold">{ value }</div>
            <div class="text-muted small">{ label.to_string() }</div>
        </div>
    }
  };

  html! {
      <div class="card mb-3">
          <div class="card-body row text-center">
              { cell("Total", stats.total.to_string()) }
              { cell("Active", stats.active.to_string()) }
              { cell("Completed", stats.completed.to_string()) }
              { cell("Completion", format!("{}%", stats.completion_rate)) }
              { cell("Today", stats.created_today.to_string()) }
          </div>
      </div>
  }
}
