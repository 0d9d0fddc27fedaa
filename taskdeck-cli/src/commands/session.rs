use std::io::{self, Write};

use anyhow::{Result, bail};
use clap::Args;
use rpassword::prompt_password;
use shared::{
    guards::Route,
    workflow::{self, SignInForm, SignUpForm},
};

use crate::context::{Context, report};

#[derive(Args, Debug)]
pub struct SignInArgs {
    /// Account email; prompted when omitted
    #[arg(long, short)]
    pub email: Option<String>,

    /// Account password; prompted when omitted
    #[arg(long, short)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct SignUpArgs {
    /// Display name; prompted when omitted
    #[arg(long, short)]
    pub name: Option<String>,

    /// Account email; prompted when omitted
    #[arg(long, short)]
    pub email: Option<String>,

    /// Password; prompted when omitted
    #[arg(long, short)]
    pub password: Option<String>,

    /// Password confirmation; defaults to --password when that is given
    #[arg(long)]
    pub confirm_password: Option<String>,
}

pub async fn sign_in(ctx: &Context, args: SignInArgs) -> Result<()> {
    ctx.enter(&Route::SignIn)?;
    let email = or_prompt(args.email, "Email: ")?;
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let note = SignInForm::new(email, password)
        .submit(&ctx.client, &ctx.auth)
        .await?;
    report(&note);

    if let Some(user) = ctx.auth.user() {
        println!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
    }
    Ok(())
}

pub async fn sign_up(ctx: &Context, args: SignUpArgs) -> Result<()> {
    ctx.enter(&Route::SignUp)?;
    let name = or_prompt(args.name, "Name: ")?;
    let email = or_prompt(args.email, "Email: ")?;
    let (password, confirm_password) = match (args.password, args.confirm_password) {
        (Some(password), Some(confirm)) => (password, confirm),
        (Some(password), None) => (password.clone(), password),
        (None, confirm) => {
            let password = prompt_password("Password: ")?;
            let confirm = match confirm {
                Some(confirm) => confirm,
                None => prompt_password("Confirm password: ")?,
            };
            (password, confirm)
        }
    };

    let form = SignUpForm {
        name,
        email,
        password,
        confirm_password,
    };
    let note = form.submit(&ctx.client).await?;
    report(&note);
    Ok(())
}

pub fn sign_out(ctx: &Context) {
    report(&workflow::sign_out(&ctx.auth));
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let user = ctx.require_user()?;
    println!("{} <{}>", user.name, user.email);
    println!("role: {}", user.role);
    if let Some(expires_at) = ctx.auth.session_store().load().expires_at {
        println!("session expires: {}", expires_at.to_rfc3339());
    }
    Ok(())
}

fn or_prompt(value: Option<String>, message: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        bail!("no input provided for {}", message.trim_end_matches([':', ' ']));
    }
    Ok(input.trim().to_string())
}
