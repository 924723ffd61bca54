//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{DashboardLayout, Home, Login, Overview, Projects, Register, Tasks};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // Landing page redirects into the board
    #[route("/")]
    Home {},

    // Auth flow
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},

    // Protected dashboard
    #[nest("/board")]
        #[layout(DashboardLayout)]
            #[route("/")]
            Overview {},
            #[route("/projects")]
            Projects {},
            #[route("/tasks")]
            Tasks {},
}

impl Route {
    /// Paths belonging to the login/registration flow, exempt from the
    /// protected-content redirect.
    pub fn is_auth_flow(&self) -> bool {
        matches!(self, Route::Login {} | Route::Register {})
    }
}
