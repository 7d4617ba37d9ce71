use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_hub::adapters::{GeminiConfig, GeminiProvider, MockEnrichmentProvider};
use campus_hub::application::{CampusSession, SeedData};
use campus_hub::config::AppConfig;
use campus_hub::domain::chat::ChatChannel;
use campus_hub::domain::event_request::Disposition;
use campus_hub::domain::foundation::{Capability, Role};
use campus_hub::domain::notice::{ClassSection, NoticeDraft, NoticePriority};
use campus_hub::ports::EnrichmentProvider;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_hub=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    let provider = build_provider(&config);
    let seed = if config.session.seed_demo_data {
        SeedData::campus()
    } else {
        SeedData::empty()
    };

    let session = CampusSession::new(provider, seed);
    let info = session.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "Campus hub session starting");

    run_demo(&session).await;

    session.settled().await;
    tracing::info!("All enrichment tasks settled, shutting down");
}

/// Builds the live Gemini provider when a key is configured, falling
/// back to the mock provider otherwise so the demo runs offline.
fn build_provider(config: &AppConfig) -> Arc<dyn EnrichmentProvider> {
    match config.ai.gemini_api_key.as_ref().filter(|key| !key.is_empty()) {
        Some(key) => {
            let gemini = GeminiConfig::new(key.clone())
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout());
            Arc::new(GeminiProvider::new(gemini))
        }
        None => {
            tracing::warn!("No Gemini API key configured, using the mock provider");
            let mock = MockEnrichmentProvider::new()
                .with_delay(Duration::from_millis(120))
                .with_insight("Great teaching starts with great questions. 🎓")
                .with_summary("Lab viva rescheduled to Friday afternoon.")
                .with_summary("OS lab viva moves to Friday 2 PM in lab 2.");
            Arc::new(mock)
        }
    }
}

/// Walks one session through the portal's operations: a teacher
/// publishing and chatting, an admin working the approval queue, and
/// a student hitting the capability boundaries.
async fn run_demo(session: &CampusSession) {
    // Teacher: initial enrichment wave, then a new notice.
    session.login(Role::Teacher).await;
    session.settled().await;
    {
        let state = session.read().await;
        tracing::info!(
            insight = state.daily_insight().unwrap_or("Loading campus insights..."),
            "Daily insight for {}",
            state.role()
        );
        for notice in state.notices() {
            tracing::info!(
                title = notice.title(),
                score = ?notice.ranking_score(),
                "Notice on the board"
            );
        }
    }

    session.set_active_class(ClassSection::CseB).await;
    session
        .update_profile("Prof. David", "https://picsum.photos/seed/faculty/100/100")
        .await;

    let body =
        "The operating systems lab viva moves to Friday 2 PM, lab 2. Bring your observation books.";
    let draft_summary = session.summarize_draft(body).await;
    let draft = NoticeDraft::new("Lab Viva Rescheduled", body)
        .with_priority(NoticePriority::High)
        .with_summary(draft_summary);
    match session.create_notice(draft).await.into_value() {
        Some(id) => {
            session.summarize_notice(id).await;
            tracing::info!(notice_id = %id, "Teacher published a notice");
        }
        None => tracing::warn!("Notice rejected"),
    }

    session
        .send_message("Viva slots are posted, check the board.", ChatChannel::General)
        .await;
    session
        .send_message("CRs, please collect observation books.", ChatChannel::CrTeacher)
        .await;

    session.search("viva").await;
    session.settled().await;
    {
        let state = session.read().await;
        tracing::info!(
            visible = state.visible_notices().len(),
            total = state.notices().len(),
            "Search applied"
        );
    }
    session.search("").await;

    // Admin: work the approval queue, then show dispose idempotence.
    session.login(Role::Admin).await;
    let pending: Vec<_> = {
        let state = session.read().await;
        state
            .requests()
            .iter()
            .filter(|request| request.is_pending())
            .map(|request| request.id())
            .collect()
    };
    for id in &pending {
        let outcome = session.dispose_event_request(*id, Disposition::Approve).await;
        tracing::info!(request_id = %id, applied = outcome.is_applied(), "Disposed request");
    }
    if let Some(id) = pending.first() {
        let again = session.dispose_event_request(*id, Disposition::Reject).await;
        tracing::info!(
            request_id = %id,
            applied = again.is_applied(),
            "Second disposition attempt is a no-op"
        );
    }

    // Student: submit a request, then bounce off the capability wall.
    session.login(Role::Student).await;
    session
        .submit_event_request("Tech Fest Stall", "A stall for the robotics club at the fest.")
        .await;
    let rejected = session
        .create_notice(NoticeDraft::new("Party", "My place, tonight"))
        .await;
    tracing::info!(
        applied = rejected.is_applied(),
        "Student attempted to publish a notice"
    );
    {
        let state = session.read().await;
        tracing::info!(
            alerts = state.alerts().len(),
            exclusive_messages = state.channel_view(ChatChannel::CrTeacher).len(),
            analytics = state.role().can(Capability::ViewAnalytics),
            "Student keeps the alert feed but not the privileged panels"
        );
    }

    session.logout().await;
}
