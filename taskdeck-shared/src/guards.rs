//! Route table and access policies.
//!
//! Guards are pure functions of an [`AuthSnapshot`]; they decide whether a
//! view renders or where navigation is redirected. The backend remains the
//! authority on what a session may actually do.

use std::fmt;

use crate::{auth::AuthSnapshot, segment};

/// Navigable views.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
    Dashboard,
    AddTask,
    EditTask { id: String },
}

impl Route {
    /// Match a location path. Query strings, fragments and a trailing slash
    /// are ignored; the task id is percent-decoded. Returns `None` for `/`,
    /// unknown paths and ids that do not decode.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["signin"] => Some(Self::SignIn),
            ["signup"] => Some(Self::SignUp),
            ["dashboard"] => Some(Self::Dashboard),
            ["task", "add"] => Some(Self::AddTask),
            ["task", "edit", id] => segment::decode(id).map(|id| Self::EditTask { id }),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::SignIn => "/signin".into(),
            Self::SignUp => "/signup".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::AddTask => "/task/add".into(),
            Self::EditTask { id } => format!("/task/edit/{}", segment::encode(id)),
        }
    }

    /// Policy protecting this view.
    #[must_use]
    pub fn guard(&self) -> Guard {
        match self {
            Self::SignIn | Self::SignUp => Guard::Public,
            Self::Dashboard => Guard::DashboardFallback,
            Self::AddTask | Self::EditTask { .. } => Guard::Protected,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Access policies wrapping a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Only for visitors without a session.
    Public,
    /// Requires a session.
    Protected,
    /// Requires an admin session.
    Admin,
    /// Always renders; visitors see the sign-in view in place of the dashboard.
    DashboardFallback,
}

/// Outcome of evaluating a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RenderSignIn,
    Redirect(Route),
}

impl Guard {
    #[must_use]
    pub fn evaluate(self, auth: &AuthSnapshot) -> GuardDecision {
        let signed_in = auth.is_authenticated();
        match self {
            Self::Public if signed_in => GuardDecision::Redirect(Route::Dashboard),
            Self::Protected if !signed_in => GuardDecision::Redirect(Route::SignIn),
            Self::Admin if !auth.is_admin() => GuardDecision::Redirect(Route::Dashboard),
            Self::DashboardFallback if !signed_in => GuardDecision::RenderSignIn,
            _ => GuardDecision::Render,
        }
    }
}

/// Result of resolving a location against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The persisted session has not been read yet; render nothing.
    Pending,
    Render(Route),
    /// Render the sign-in view while the location stays on `requested`.
    RenderSignIn { requested: Route },
    Redirect(Route),
}

/// Resolve a location for the given auth state. `/` and unknown paths
/// redirect to the dashboard.
#[must_use]
pub fn resolve(path: &str, auth: &AuthSnapshot) -> Resolution {
    resolve_route(Route::parse(path), auth)
}

/// Resolve an already-matched route; `None` stands for `/` and unknown
/// locations.
#[must_use]
pub fn resolve_route(route: Option<Route>, auth: &AuthSnapshot) -> Resolution {
    if auth.loading {
        return Resolution::Pending;
    }
    let Some(route) = route else {
        return Resolution::Redirect(Route::Dashboard);
    };
    match route.guard().evaluate(auth) {
        GuardDecision::Render => Resolution::Render(route),
        GuardDecision::RenderSignIn => Resolution::RenderSignIn { requested: route },
        GuardDecision::Redirect(target) => Resolution::Redirect(target),
    }
}
