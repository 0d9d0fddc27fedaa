use shared::guards::{Resolution, resolve};

use crate::context::Context;

/// Describe what the web client would do for `path`.
pub fn show(ctx: &Context, path: &str) {
    println!("{}", describe(&resolve(path, &ctx.auth.snapshot())));
}

fn describe(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Pending => "pending".to_string(),
        Resolution::Render(route) => format!("render {route}"),
        Resolution::RenderSignIn { requested } => format!("render /signin at {requested}"),
        Resolution::Redirect(target) => format!("redirect {target}"),
    }
}
