//! Session commands.

use std::io::Write;

use boutique_storefront::Storefront;
use boutique_storefront::services::{Registration, TableServices};
use secrecy::SecretString;

use super::CliError;

/// Log in and greet the user.
pub async fn login<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    email: &str,
    password: String,
) -> Result<(), CliError> {
    let identity = storefront
        .login(email, &SecretString::from(password))
        .await?;
    writeln!(out, "Logged in as {} <{}>", identity.display_name(), identity.email)?;
    Ok(())
}

/// Create an account and log in.
pub async fn register<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<(), CliError> {
    let mut registration = Registration::new(email, SecretString::from(password));
    if let Some(first_name) = first_name {
        registration = registration.with_attribute("first_name", first_name);
    }
    if let Some(last_name) = last_name {
        registration = registration.with_attribute("last_name", last_name);
    }

    let identity = storefront.register(registration).await?;
    writeln!(out, "Account created for {}", identity.email)?;
    Ok(())
}

/// Log out and print the page to go to.
pub fn logout<S: TableServices>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let home = storefront.logout();
    writeln!(out, "{home}")?;
    Ok(())
}

/// Describe the current session.
pub fn whoami<S: TableServices>(
    storefront: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match storefront.current_user() {
        Some(identity) => {
            let role = if identity.is_admin { "administrator" } else { "customer" };
            writeln!(
                out,
                "{} <{}> ({role})",
                identity.display_name(),
                identity.email
            )?;
        }
        None => writeln!(out, "anonymous")?,
    }
    Ok(())
}
