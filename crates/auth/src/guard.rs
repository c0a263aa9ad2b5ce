//! Navigation guard.

use std::sync::Arc;

use crate::routes::Route;
use crate::session::{Session, SessionState};

/// What counts as "logged in" for protected screens.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any credential, including the static fallback service token.
    #[default]
    AnyCredential,
    /// Only a personal session obtained through login.
    UserSession,
}

impl AccessPolicy {
    pub fn admits(&self, state: &SessionState) -> bool {
        match self {
            AccessPolicy::AnyCredential => state.has_credential(),
            AccessPolicy::UserSession => state.has_user_session(),
        }
    }
}

impl core::str::FromStr for AccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any-credential" | "any" => Ok(AccessPolicy::AnyCredential),
            "user-session" | "user" => Ok(AccessPolicy::UserSession),
            other => Err(format!(
                "unknown access policy '{other}' (expected any-credential or user-session)"
            )),
        }
    }
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect { from: Route, to: Route },
}

impl Navigation {
    /// The screen that ends up displayed.
    pub fn destination(&self) -> &Route {
        match self {
            Navigation::Allow(route) => route,
            Navigation::Redirect { to, .. } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirect { .. })
    }
}

/// Pure navigation policy.
///
/// - protected route without a session: go to login
/// - login while a session exists: go to the dashboard
/// - otherwise: allow
pub fn decide(policy: AccessPolicy, state: &SessionState, to: Route) -> Navigation {
    let admitted = policy.admits(state);

    if to.requires_auth() && !admitted {
        Navigation::Redirect {
            from: to,
            to: Route::Login,
        }
    } else if to == Route::Login && admitted {
        Navigation::Redirect {
            from: to,
            to: Route::Dashboard,
        }
    } else {
        Navigation::Allow(to)
    }
}

/// Guard run before every navigation.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Arc<Session>,
    policy: AccessPolicy,
}

impl RouteGuard {
    pub fn new(session: Arc<Session>, policy: AccessPolicy) -> Self {
        Self { session, policy }
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Rehydrate the session, then apply [`decide`].
    ///
    /// A storage failure during rehydration is logged and the in-memory state
    /// is used as-is.
    pub async fn before_each(&self, to: Route) -> Navigation {
        if let Err(e) = self.session.initialize().await {
            tracing::warn!("session rehydration failed before navigation: {}", e);
        }
        let state = self.session.snapshot().await;
        let navigation = decide(self.policy, &state, to);
        if let Navigation::Redirect { from, to } = &navigation {
            tracing::debug!(from = %from, to = %to, "navigation redirected");
        }
        navigation
    }

    /// Navigate to a raw path (unknown paths land on the dashboard).
    pub async fn navigate(&self, path: &str) -> Navigation {
        self.before_each(Route::resolve(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Section;
    use crate::store::{MemoryStore, SessionStore, TOKEN_KEY};
    use crate::user::User;
    use autocatalog_core::EntityId;

    fn anonymous(fallback: Option<&str>) -> SessionState {
        SessionState::Anonymous {
            fallback_token: fallback.map(str::to_string),
        }
    }

    fn logged_in() -> SessionState {
        SessionState::Authenticated {
            token: "jwt".into(),
            user: Some(User {
                id: EntityId::new(1),
                username: "user".into(),
                email: "user@x.com".into(),
                confirmed: None,
                blocked: None,
            }),
        }
    }

    #[test]
    fn protected_route_without_session_redirects_to_login() {
        let nav = decide(
            AccessPolicy::AnyCredential,
            &anonymous(None),
            Route::List(Section::Vehicles),
        );
        assert_eq!(nav.destination(), &Route::Login);
    }

    #[test]
    fn login_with_session_redirects_to_dashboard() {
        let nav = decide(AccessPolicy::AnyCredential, &logged_in(), Route::Login);
        assert_eq!(
            nav,
            Navigation::Redirect {
                from: Route::Login,
                to: Route::Dashboard
            }
        );
    }

    #[test]
    fn login_without_session_is_allowed() {
        let nav = decide(AccessPolicy::AnyCredential, &anonymous(None), Route::Login);
        assert_eq!(nav, Navigation::Allow(Route::Login));
    }

    #[test]
    fn fallback_credential_admits_under_default_policy_only() {
        let state = anonymous(Some("service"));
        let to = Route::List(Section::Brands);

        assert!(!decide(AccessPolicy::AnyCredential, &state, to.clone()).is_redirect());
        assert_eq!(
            decide(AccessPolicy::UserSession, &state, to).destination(),
            &Route::Login
        );
    }

    #[test]
    fn access_policy_parses_config_values() {
        assert_eq!("user-session".parse::<AccessPolicy>().unwrap(), AccessPolicy::UserSession);
        assert_eq!("ANY".parse::<AccessPolicy>().unwrap(), AccessPolicy::AnyCredential);
        assert!("nobody".parse::<AccessPolicy>().is_err());
    }

    #[tokio::test]
    async fn guard_rehydrates_before_deciding() {
        let store = Arc::new(MemoryStore::new());
        let session = Arc::new(Session::open(store.clone(), None).await.unwrap());
        let guard = RouteGuard::new(session, AccessPolicy::AnyCredential);

        assert_eq!(guard.navigate("/vehicles").await.destination(), &Route::Login);

        // Credential written behind the session's back.
        store.set(TOKEN_KEY, "external").await.unwrap();
        assert_eq!(
            guard.navigate("/vehicles").await,
            Navigation::Allow(Route::List(Section::Vehicles))
        );
    }
}
