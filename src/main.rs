use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing::{debug, warn};

use smart_diet_rs::advice::{
    AdviceConfig, AdviceGateway, DisabledAdviceGateway, GeminiAdviceGateway,
};
use smart_diet_rs::cli::{Cli, Command};
use smart_diet_rs::error::Result;
use smart_diet_rs::interface::{
    collect_profile, display_advice_state, display_plan, display_profile,
};
use smart_diet_rs::models::Profile;
use smart_diet_rs::state::{AdviceState, PlanController, load_profile, write_menu_csv};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    smart_diet_rs::logging::init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or_default();

    match command {
        Command::Plan => cmd_plan(&cli).await,
        Command::Example => cmd_example(),
    }
}

/// Build the gateway selected by flags and environment.
fn build_gateway(no_advice: bool) -> Result<Arc<dyn AdviceGateway>> {
    if no_advice {
        return Ok(Arc::new(DisabledAdviceGateway));
    }

    let config = AdviceConfig::from_env()?;
    if !config.is_configured() {
        debug!("GEMINI_API_KEY not set; advice disabled");
    }
    Ok(Arc::new(GeminiAdviceGateway::new(config)?))
}

/// Calculate a plan, show it, then fetch and show advice.
async fn cmd_plan(cli: &Cli) -> Result<()> {
    let profile = match &cli.profile {
        Some(path) => load_profile(path)?,
        None => collect_profile(&Profile::default())?,
    };

    let controller = PlanController::new(build_gateway(cli.no_advice)?);

    // Stage one: the numeric plan is complete before advice is requested.
    let (result, ticket) = controller.compute_plan(profile.clone()).await?;

    if !cli.json {
        display_profile(&profile);
        display_plan(&result);
        if !cli.no_advice {
            display_advice_state(&AdviceState::Loading);
        }
    }

    // Stage two: advice is additive and may be unavailable.
    controller.resolve_advice(&profile, &result, ticket).await;
    let advice = controller.advice().await.unwrap_or(AdviceState::NotRequested);

    if let Some(path) = &cli.menu_csv {
        match &advice {
            AdviceState::Ready(a) if a.weekly_menu.is_some() => {
                let rows = write_menu_csv(path, a)?;
                if !cli.json {
                    println!("Wrote {} meals to {}", rows, path.display());
                }
            }
            _ => warn!(path = %path.display(), "no weekly menu to export"),
        }
    }

    if cli.json {
        let advice_json = match &advice {
            _ if cli.no_advice => json!({ "status": "disabled" }),
            AdviceState::Ready(a) => json!({ "status": "ready", "advice": a }),
            AdviceState::Unavailable(e) => json!({
                "status": "unavailable",
                "reason": e.reason.code(),
                "detail": e.detail,
            }),
            AdviceState::NotRequested | AdviceState::Loading => json!({ "status": "disabled" }),
        };
        let report = json!({
            "profile": profile,
            "result": result,
            "advice": advice_json,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.no_advice {
        display_advice_state(&advice);
    }

    Ok(())
}

/// Print a profile file that can be edited and passed back with `--profile`.
fn cmd_example() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&Profile::default())?);
    Ok(())
}
