mod add_task_form;
mod filter_tabs;
mod stats_panel;
mod task_editor;
mod task_list;
mod task_row;
mod toast_stack;
mod toolbar;

pub use add_task_form::AddTaskForm;
pub use filter_tabs::FilterTabs;
pub use stats_panel::StatsPanel;
pub use task_editor::TaskEditor;
pub use task_list::TaskList;
pub use task_row::{
  RowActions,
  TaskRowView
};
pub use toast_stack::ToastStackView;
pub use toolbar::Toolbar;
