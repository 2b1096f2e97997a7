use cyberguard::adapters::outbound::console::{renderer, StderrProgressReporter};
use cyberguard::adapters::outbound::memory::StaticRecordStore;
use cyberguard::adapters::outbound::network::{
    GeminiClient, SupabaseAuthProvider, SupabaseRecordStore,
};
use cyberguard::application::{AnalysisOrchestrator, SelectionController, SlotState};
use cyberguard::cli::{AnalyzeTarget, Args, Command};
use cyberguard::config::{discover_config, load_config_from_path, AppConfig, DataSource};
use cyberguard::ports::outbound::{AuthProvider, RecordStore};
use cyberguard::shared::{ExitCode, Result, TriageError};
use cyberguard::triage::services::metrics::{dashboard_metrics, threat_feed};
use std::io::{BufRead, Write};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let file = match &args.config {
        Some(path) => load_config_from_path(Path::new(path))?,
        None => discover_config(Path::new("."))?.unwrap_or_default(),
    };
    let config = AppConfig::resolve(file)?;
    let format = args.format.render_format();

    let store = build_record_store(&config)?;

    match args.command {
        Command::Alerts => {
            let alerts = store.list_alerts().await?;
            print!("{}", renderer::render_alert_list(&alerts, format)?);
            Ok(ExitCode::Success)
        }
        Command::Vulns => {
            let vulnerabilities = store.list_vulnerabilities().await?;
            print!(
                "{}",
                renderer::render_vulnerability_list(&vulnerabilities, format)?
            );
            Ok(ExitCode::Success)
        }
        Command::Metrics => {
            let alerts = store.list_alerts().await?;
            let vulnerabilities = store.list_vulnerabilities().await?;
            let metrics = dashboard_metrics(&alerts, &vulnerabilities, chrono::Utc::now());
            print!("{}", renderer::render_metrics(&metrics, format)?);
            println!();
            print!(
                "{}",
                renderer::render_threat_feed(&threat_feed(&alerts), format)?
            );
            Ok(ExitCode::Success)
        }
        Command::Analyze { target } => {
            let controller = build_controller(&config)?;
            run_analyze(&controller, store.as_ref(), target, format).await
        }
        Command::Triage => {
            let controller = build_controller(&config)?;
            run_triage_shell(&config, &controller, store.as_ref(), format).await
        }
    }
}

fn build_record_store(config: &AppConfig) -> Result<Box<dyn RecordStore>> {
    match config.data_source {
        DataSource::Builtin => Ok(Box::new(StaticRecordStore::seeded())),
        DataSource::Supabase => {
            let (url, key) = supabase_credentials(config)?;
            Ok(Box::new(SupabaseRecordStore::new(url, key)?))
        }
    }
}

fn build_controller(
    config: &AppConfig,
) -> Result<SelectionController<GeminiClient, StderrProgressReporter>> {
    let backend = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())?;
    let reporter = StderrProgressReporter::new();
    let orchestrator = AnalysisOrchestrator::new(backend, reporter);
    Ok(SelectionController::new(orchestrator))
}

fn supabase_credentials(config: &AppConfig) -> Result<(String, String)> {
    match (&config.supabase_url, &config.supabase_anon_key) {
        (Some(url), Some(key)) => Ok((url.clone(), key.clone())),
        _ => Err(TriageError::Validation {
            message: "supabase_url and supabase_anon_key are required for the supabase data source"
                .to_string(),
        }
        .into()),
    }
}

async fn run_analyze(
    controller: &SelectionController<GeminiClient, StderrProgressReporter>,
    store: &dyn RecordStore,
    target: AnalyzeTarget,
    format: cyberguard::adapters::outbound::console::RenderFormat,
) -> Result<ExitCode> {
    match target {
        AnalyzeTarget::Alert { id } => {
            let alerts = store.list_alerts().await?;
            let alert = alerts
                .into_iter()
                .find(|a| a.id == id)
                .ok_or_else(|| TriageError::Validation {
                    message: format!("No alert with id '{}'. Run 'cyberguard alerts' to list ids", id),
                })?;

            controller.select_alert(alert.clone()).await;
            let analysis = controller.alert_analysis();
            print!(
                "{}",
                renderer::render_alert_details(&alert, &analysis, format)?
            );
            Ok(analysis_exit_code(matches!(analysis, SlotState::Failed(_))))
        }
        AnalyzeTarget::Vuln { id } => {
            let vulnerabilities = store.list_vulnerabilities().await?;
            let vulnerability = vulnerabilities
                .into_iter()
                .find(|v| v.id == id || v.cve_id == id)
                .ok_or_else(|| TriageError::Validation {
                    message: format!(
                        "No vulnerability with id '{}'. Run 'cyberguard vulns' to list ids",
                        id
                    ),
                })?;

            controller.select_vulnerability(vulnerability.clone()).await;
            let analysis = controller.vulnerability_analysis();
            print!(
                "{}",
                renderer::render_vulnerability_details(&vulnerability, &analysis, format)?
            );
            Ok(analysis_exit_code(matches!(analysis, SlotState::Failed(_))))
        }
    }
}

fn analysis_exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::AnalysisFailed
    } else {
        ExitCode::Success
    }
}

/// Interactive triage loop over stdin.
///
/// When records come from Supabase, a session is established first; the
/// dashboard stays locked behind sign-in just like the hosted UI.
async fn run_triage_shell(
    config: &AppConfig,
    controller: &SelectionController<GeminiClient, StderrProgressReporter>,
    store: &dyn RecordStore,
    format: cyberguard::adapters::outbound::console::RenderFormat,
) -> Result<ExitCode> {
    let auth = match config.data_source {
        DataSource::Supabase => {
            let (url, key) = supabase_credentials(config)?;
            let provider = SupabaseAuthProvider::new(url, key)?;
            sign_in_interactive(&provider).await?;
            Some(provider)
        }
        DataSource::Builtin => None,
    };

    println!("cyberguard triage shell. Type 'help' for commands, 'quit' to exit.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let argument = words.next();

        match (command, argument) {
            ("alerts", _) => {
                let alerts = store.list_alerts().await?;
                print!("{}", renderer::render_alert_list(&alerts, format)?);
            }
            ("vulns", _) => {
                let vulnerabilities = store.list_vulnerabilities().await?;
                print!(
                    "{}",
                    renderer::render_vulnerability_list(&vulnerabilities, format)?
                );
            }
            ("metrics", _) => {
                let alerts = store.list_alerts().await?;
                let vulnerabilities = store.list_vulnerabilities().await?;
                let metrics = dashboard_metrics(&alerts, &vulnerabilities, chrono::Utc::now());
                print!("{}", renderer::render_metrics(&metrics, format)?);
                print!(
                    "{}",
                    renderer::render_threat_feed(&threat_feed(&alerts), format)?
                );
            }
            ("alert", Some(id)) => {
                let alerts = store.list_alerts().await?;
                match alerts.into_iter().find(|a| a.id == id) {
                    Some(alert) => {
                        controller.select_alert(alert.clone()).await;
                        let analysis = controller.alert_analysis();
                        print!(
                            "{}",
                            renderer::render_alert_details(&alert, &analysis, format)?
                        );
                    }
                    None => println!("No alert with id '{}'", id),
                }
            }
            ("vuln", Some(id)) => {
                let vulnerabilities = store.list_vulnerabilities().await?;
                match vulnerabilities
                    .into_iter()
                    .find(|v| v.id == id || v.cve_id == id)
                {
                    Some(vulnerability) => {
                        controller.select_vulnerability(vulnerability.clone()).await;
                        let analysis = controller.vulnerability_analysis();
                        print!(
                            "{}",
                            renderer::render_vulnerability_details(
                                &vulnerability,
                                &analysis,
                                format
                            )?
                        );
                    }
                    None => println!("No vulnerability with id '{}'", id),
                }
            }
            ("clear", _) => {
                controller.clear_selection();
                println!("Selection cleared.");
            }
            ("help", _) => {
                println!("Commands:");
                println!("  alerts        list recent alerts");
                println!("  vulns         list tracked vulnerabilities");
                println!("  metrics       dashboard metrics and threat feed");
                println!("  alert <id>    select an alert and run AI analysis");
                println!("  vuln <id>     select a vulnerability and run AI analysis");
                println!("  clear         clear the current selection");
                println!("  quit          exit the shell");
            }
            ("quit", _) | ("exit", _) => break,
            ("", _) => {}
            (other, _) => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }

    if let Some(provider) = auth {
        provider.sign_out().await?;
        eprintln!("Signed out.");
    }
    Ok(ExitCode::Success)
}

async fn sign_in_interactive(provider: &SupabaseAuthProvider) -> Result<()> {
    let stdin = std::io::stdin();
    loop {
        print!("Email: ");
        std::io::stdout().flush()?;
        let mut email = String::new();
        stdin.lock().read_line(&mut email)?;

        print!("Password: ");
        std::io::stdout().flush()?;
        let mut password = String::new();
        stdin.lock().read_line(&mut password)?;

        match provider
            .sign_in(email.trim(), password.trim_end_matches(['\r', '\n']))
            .await
        {
            Ok(session) => {
                eprintln!("Signed in as {}.", session.user_email);
                return Ok(());
            }
            Err(error) => {
                eprintln!("⚠️  {:#}", error);
                eprintln!("Try again, or press Ctrl-C to abort.");
            }
        }
    }
}
