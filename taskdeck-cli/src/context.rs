use anyhow::{Result, bail};
use shared::{
    api::TaskDeckClient,
    auth::AuthContext,
    config::ClientConfig,
    guards::{Resolution, Route, resolve_route},
    models::User,
    notify::Notification,
    session::{FileStore, SessionStore},
};
use tracing::debug;

/// Session, gateway and paging settings shared by every command.
#[derive(Debug)]
pub struct Context {
    pub auth: AuthContext<FileStore>,
    pub client: TaskDeckClient,
    pub page_size: u32,
}

impl Context {
    pub fn new(config: &ClientConfig) -> Self {
        let path = config.session_file();
        debug!(session = %path.display(), "using session file");
        let auth = AuthContext::with_ttl(
            SessionStore::new(FileStore::new(path)),
            config.session_ttl(),
        );
        auth.hydrate();

        let client = TaskDeckClient::new(config.api_base_url.as_str());
        client.follow(&auth);

        Self {
            auth,
            client,
            page_size: config.page_size,
        }
    }

    /// Apply the route guard of the view a command stands in for.
    pub fn enter(&self, route: &Route) -> Result<()> {
        match resolve_route(Some(route.clone()), &self.auth.snapshot()) {
            Resolution::Render(_) => Ok(()),
            Resolution::RenderSignIn { .. } | Resolution::Redirect(Route::SignIn) => {
                bail!("not signed in; run `taskdeck signin` first")
            }
            Resolution::Redirect(Route::Dashboard) => match self.auth.user() {
                Some(user) => bail!(
                    "already signed in as {}; run `taskdeck signout` first",
                    user.email
                ),
                None => bail!("{route} is not available"),
            },
            Resolution::Redirect(target) => bail!("{route} redirects to {target}"),
            Resolution::Pending => bail!("session is still loading"),
        }
    }

    pub fn require_user(&self) -> Result<User> {
        match self.auth.user() {
            Some(user) if self.auth.is_authenticated() => Ok(user),
            _ => bail!("not signed in; run `taskdeck signin` first"),
        }
    }
}

/// Print a success or info notification.
pub fn report(note: &Notification) {
    println!("{note}");
}
