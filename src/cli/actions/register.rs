use super::{report, Args};
use crate::{
    features::auth::{AuthContext, HttpAuthService},
    navigation::History,
    routes::{register, Mount},
};
use anyhow::{Context, Result};

/// Mount the registration variant named by the location, then submit it.
/// Invited users get their registration info fetched first.
/// # Errors
/// Returns an error if the translations or the HTTP client cannot be set up,
/// or if the submission does not navigate away.
pub async fn execute(args: Args) -> Result<()> {
    let catalog = args.config.catalog().context("failed to load translations")?;
    let service =
        HttpAuthService::from_config(&args.config).context("failed to build the HTTP client")?;
    let auth = AuthContext::new();
    let history = History::new();

    let form = match register::mount(&args.location, &service, &history).await {
        Mount::Ready(form) => form,
        Mount::Redirected(redirect) => return report::redirected(&redirect),
    };
    report::fill(&form, &args.values);

    let outcome = form.submit(&service, &auth, &history).await;
    report::outcome(outcome, &auth, &catalog)
}
