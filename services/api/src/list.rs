use clap::Args;
use permit_list::config::AppConfig;
use permit_list::error::AppError;
use permit_list::permits::{envelope, PermitListService};
use permit_list::source::{ResponseSource, ScreendoorClient};
use permit_list::telemetry::{self, RequestContext};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Listing variant to fetch (`retail` or `retail_legacy`)
    pub(crate) permit_type: String,
    /// Pretty-print the JSON envelope
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let client = Arc::new(ScreendoorClient::new(&config.source)?);
    let service = PermitListService::new(client, config.source.project_id.clone());

    let rendered = render_listing(&service, &args.permit_type, args.pretty).await?;
    println!("{rendered}");
    Ok(())
}

pub(crate) async fn render_listing<S>(
    service: &PermitListService<S>,
    permit_type: &str,
    pretty: bool,
) -> Result<String, AppError>
where
    S: ResponseSource + 'static,
{
    let ctx = RequestContext::new("permitlist.cli")
        .child("get_permit_list")
        .child(permit_type);
    let listing = service.list(permit_type, &ctx).await?;
    let body = envelope::success(listing);

    let rendered = if pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tests::FixtureSource;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn renders_success_envelope() {
        let service = PermitListService::new(Arc::new(FixtureSource::sample()), "4321");

        let rendered = render_listing(&service, "retail", false)
            .await
            .expect("renders");
        let body: Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["list"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn propagates_unsupported_type() {
        let service = PermitListService::new(Arc::new(FixtureSource::new(json!([]))), "4321");

        let error = render_listing(&service, "wholesale", true)
            .await
            .expect_err("rejected");
        assert!(matches!(error, AppError::Listing(_)));
    }
}
