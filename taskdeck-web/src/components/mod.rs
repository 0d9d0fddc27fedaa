pub mod loading;
pub mod pagination;
pub mod task_card;
pub mod task_form;
pub mod toast;
