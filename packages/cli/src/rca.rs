// ABOUTME: Interactive RCA wizard - the presentation shell over the workflow controller
// ABOUTME: Progress indicator, step actions, AI suggestion/enhancement pickers, session handling

use std::sync::Arc;
use std::time::Duration;

use colored::*;
use inquire::{Editor, Select};

use opsdesk_config::Config;
use opsdesk_gateway::RemoteGateway;
use opsdesk_session::{FileCredentialStore, MonitorConfig, SessionEvent, SessionMonitor};
use opsdesk_workflow::{AdvanceResult, SaveStatus, WizardStep, WorkflowController};

const ACTION_EDIT: &str = "Edit answer";
const ACTION_SUGGESTION: &str = "Pick an AI suggestion";
const ACTION_ENHANCE: &str = "Enhance text";
const ACTION_NEXT: &str = "Next step";
const ACTION_BACK: &str = "Previous step";
const ACTION_JUMP: &str = "Jump to step";
const ACTION_QUIT: &str = "Quit";

pub async fn run(
    ticket_id: &str,
    gateway: Arc<dyn RemoteGateway>,
    store: Arc<FileCredentialStore>,
    config: &Config,
) -> anyhow::Result<()> {
    let ticket = gateway.get_ticket(ticket_id).await?;
    let existing = gateway.get_resolution(ticket_id).await?;

    let monitor = SessionMonitor::new(
        Arc::clone(&gateway),
        store,
        MonitorConfig {
            poll_interval: Duration::from_secs(config.session_poll_secs),
            probe_timeout: Duration::from_secs(config.session_probe_timeout_secs),
        },
    );
    let mut session_events = monitor.subscribe();
    monitor.start().await;

    let mut controller = WorkflowController::initialize(gateway, ticket, existing);

    println!(
        "{} {}",
        "Root Cause Analysis:".blue().bold(),
        controller.ticket().short_description.bold()
    );

    let outcome = wizard_loop(&mut controller, &mut session_events).await;
    monitor.stop().await;
    outcome
}

async fn wizard_loop(
    controller: &mut WorkflowController,
    session_events: &mut tokio::sync::broadcast::Receiver<SessionEvent>,
) -> anyhow::Result<()> {
    loop {
        if let Ok(SessionEvent::Invalidated { reason }) = session_events.try_recv() {
            println!();
            println!("{} {}", "Signed out:".red().bold(), reason);
            println!("{}", "Run 'opsdesk auth login' to start a new session.".dimmed());
            return Ok(());
        }

        let step = controller.current_step();
        controller.maybe_generate(step).await;

        render_progress(controller);
        render_answer(controller);

        let mut actions = vec![ACTION_EDIT];
        if !controller.state().metadata(step).suggestions.is_empty() {
            actions.push(ACTION_SUGGESTION);
        }
        if matches!(step, WizardStep::RootCause | WizardStep::CorrectiveActions) {
            actions.push(ACTION_ENHANCE);
        }
        actions.push(ACTION_NEXT);
        if step.prev().is_some() {
            actions.push(ACTION_BACK);
        }
        actions.push(ACTION_JUMP);
        actions.push(ACTION_QUIT);

        match Select::new("Action:", actions).prompt()? {
            ACTION_EDIT => edit_answer(controller)?,
            ACTION_SUGGESTION => pick_suggestion(controller)?,
            ACTION_ENHANCE => enhance_answer(controller).await?,
            ACTION_NEXT => {
                if advance(controller).await? {
                    return Ok(());
                }
            }
            ACTION_BACK => controller.retreat(),
            ACTION_JUMP => jump(controller)?,
            _ => {
                println!("{}", "Progress is saved per completed step.".dimmed());
                return Ok(());
            }
        }
    }
}

fn render_progress(controller: &WorkflowController) {
    println!();
    let current = controller.current_step();
    let parts: Vec<String> = WizardStep::all()
        .iter()
        .map(|step| {
            let label = format!("{} {}", step.number(), step.title());
            if *step == current {
                format!("▶ {}", label).blue().bold().to_string()
            } else if controller.state().step_complete(*step) {
                format!("✓ {}", label).green().to_string()
            } else {
                format!("○ {}", label).dimmed().to_string()
            }
        })
        .collect();
    println!("{}", parts.join("  →  "));
}

fn render_answer(controller: &WorkflowController) {
    let buffer = &controller.state().buffer;
    println!();
    if buffer.trim().is_empty() {
        println!("{}", "(no answer yet)".dimmed());
    } else {
        for line in buffer.lines() {
            println!("  {}", line);
        }
    }
    println!();
}

fn edit_answer(controller: &mut WorkflowController) -> anyhow::Result<()> {
    let edited = Editor::new("Answer:")
        .with_predefined_text(&controller.state().buffer)
        .prompt()?;
    controller.set_answer(edited);
    Ok(())
}

fn pick_suggestion(controller: &mut WorkflowController) -> anyhow::Result<()> {
    let step = controller.current_step();
    let suggestions = controller.state().metadata(step).suggestions.clone();
    let preview: Vec<String> = suggestions
        .iter()
        .map(|s| s.lines().next().unwrap_or_default().to_string())
        .collect();

    // Previews can collide (identical first lines), so select by index.
    let index = Select::new("Suggestion (overwrites the current answer):", preview)
        .raw_prompt()?
        .index;

    // Structured solutions keep their step list for persistence.
    if step == WizardStep::CorrectiveActions && !controller.solutions().is_empty() {
        controller.apply_solution(index);
    } else {
        controller.apply_suggestion(index);
    }
    Ok(())
}

async fn enhance_answer(controller: &mut WorkflowController) -> anyhow::Result<()> {
    let options = match controller.enhance_current().await {
        Ok(options) if !options.is_empty() => options,
        Ok(_) => {
            println!("{}", "No enhancement options returned".yellow());
            return Ok(());
        }
        Err(e) => {
            println!("{} {}", "Enhancement unavailable:".yellow(), e);
            return Ok(());
        }
    };

    let labels: Vec<String> = options
        .iter()
        .map(|o| format!("{} ({:.0}% confidence)", o.option, o.confidence * 100.0))
        .collect();
    // Highest confidence is pre-selected.
    let index = Select::new("Enhanced version:", labels)
        .with_starting_cursor(0)
        .raw_prompt()?
        .index;
    controller.apply_enhancement(&options[index]);
    Ok(())
}

async fn advance(controller: &mut WorkflowController) -> anyhow::Result<bool> {
    match controller.advance().await {
        AdvanceResult::EmptyAnswer => {
            println!(
                "{}",
                "An answer is required before moving on. Edit the step first.".red()
            );
            Ok(false)
        }
        AdvanceResult::Advanced { save, .. } => {
            warn_on_save_failure(&save);
            Ok(false)
        }
        AdvanceResult::Completed { save } => {
            warn_on_save_failure(&save);
            println!();
            println!("{}", "Root cause analysis complete.".green().bold());
            for step in WizardStep::all() {
                println!();
                println!("{}", step.to_string().bold());
                for line in controller.state().answer(step).lines() {
                    println!("  {}", line);
                }
            }
            Ok(true)
        }
    }
}

fn warn_on_save_failure(save: &SaveStatus) {
    if let SaveStatus::Failed(reason) = save {
        println!(
            "{} {}",
            "Warning: step not saved to the backend:".yellow(),
            reason
        );
        println!("{}", "You can keep working; the next save will retry.".dimmed());
    }
}

fn jump(controller: &mut WorkflowController) -> anyhow::Result<()> {
    let labels: Vec<String> = WizardStep::all().iter().map(|s| s.to_string()).collect();
    let index = Select::new("Go to:", labels).raw_prompt()?.index;
    controller.jump_to(WizardStep::from_index0(index)?);
    Ok(())
}
