use serde_json::json;

use crate::app::{Auth, RouteInfo, ROUTES};
use crate::cli::utils::{format_table, output_success};
use crate::cli::OutputFormat;
use crate::config::config;

pub fn handle(all: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let routes = mounted_routes(all || config().iast.enabled);

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            &format!("{} routes", routes.len()),
            Some(json!({ "routes": routes })),
        ),
        OutputFormat::Text => {
            let mut rows = vec![vec![
                "METHOD".to_string(),
                "PATH".to_string(),
                "AUTH".to_string(),
                "DESCRIPTION".to_string(),
            ]];
            rows.extend(routes.iter().map(|route| {
                vec![
                    route.method.to_string(),
                    route.path.to_string(),
                    auth_label(route.auth).to_string(),
                    route.description.to_string(),
                ]
            }));
            println!("{}", format_table(&rows));
            Ok(())
        }
    }
}

fn mounted_routes(include_iast: bool) -> Vec<RouteInfo> {
    ROUTES
        .iter()
        .filter(|route| include_iast || !route.path.starts_with("/iast"))
        .copied()
        .collect()
}

fn auth_label(auth: Auth) -> &'static str {
    match auth {
        Auth::None => "-",
        Auth::Optional => "optional",
        Auth::Required => "required",
    }
}
