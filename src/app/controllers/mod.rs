pub(super) mod service_controller;
pub(super) mod view_controller;
