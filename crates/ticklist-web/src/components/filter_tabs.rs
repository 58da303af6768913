use ticklist_core::TaskFilter;
use ticklist_core::view::FilterTab;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterTabsProps {
  pub tabs:      Vec<FilterTab>,
  pub on_select: Callback<TaskFilter>
}

#[function_component(FilterTabs)]
pub fn filter_tabs(
  props: &FilterTabsProps
) -> Html {
  html! {
      <ul class="nav nav-pills mb-3">
          {
              for props.tabs.iter().map(|tab| {
                  let filter = tab.filter;
                  let on_select = props.on_select.clone();
                  html! {
                      <li class="nav-item">
                          <button
                              class={classes!("nav-link", tab.selected.then_some("active"))}
                              data-filter={filter.key()}
                              onclick={move |_| on_select.emit(filter)}
                          >
                              { filter.label() }
                              <span class="badge bg-secondary ms-1">{ tab.count.to_string() }</span>
                          </button>
                      </li>
                  }
              })
          }
      </ul>
  }
}
