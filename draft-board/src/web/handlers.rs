// HTTP handlers: read the session's draft state, apply a command or render.

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::config::SeedConfig;
use crate::draft::command::{self, Command, Outcome};
use crate::draft::session::SessionState;
use crate::view::{build_view, DraftView, ViewSelection};

use super::error::WebError;
use super::html::render_page;
use super::AppState;

/// Session key holding the serialized `SessionState`.
pub const SESSION_STATE_KEY: &str = "draft_board:state";
/// Session key holding the notice for the next render.
pub const SESSION_NOTICE_KEY: &str = "draft_board:notice";

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// Return the session's draft state, seeding and storing it on first use.
/// A stored value is never re-seeded.
pub async fn load_or_init(session: &Session, seed: &SeedConfig) -> Result<SessionState, WebError> {
    if let Some(state) = session.get::<SessionState>(SESSION_STATE_KEY).await? {
        return Ok(state);
    }

    let state = SessionState::seeded(seed);
    session.insert(SESSION_STATE_KEY, &state).await?;
    info!(
        "Started draft session: {} picked, {} on my team",
        state.picked.len(),
        state.my_team.len()
    );
    Ok(state)
}

pub async fn store(session: &Session, state: &SessionState) -> Result<(), WebError> {
    session.insert(SESSION_STATE_KEY, state).await?;
    Ok(())
}

/// Remove and return the pending notice, so it shows exactly once.
pub async fn take_notice(session: &Session) -> Result<Option<String>, WebError> {
    Ok(session.remove::<String>(SESSION_NOTICE_KEY).await?)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Position selectors carried in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub off: Option<String>,
    pub def: Option<String>,
}

impl SelectionQuery {
    pub fn selection(&self) -> ViewSelection {
        ViewSelection::from_query(self.off.as_deref(), self.def.as_deref())
    }
}

/// Body of `/remove` and `/undo`. A disabled select submits no `name`.
#[derive(Debug, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
    pub off: Option<String>,
    pub def: Option<String>,
}

/// Body of `/pick`.
#[derive(Debug, Deserialize)]
pub struct PickForm {
    pub round: u32,
    #[serde(default)]
    pub name: String,
    pub off: Option<String>,
    pub def: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /`: the full page.
pub async fn index(
    State(app): State<AppState>,
    session: Session,
    Query(query): Query<SelectionQuery>,
) -> Result<Html<String>, WebError> {
    let state = load_or_init(&session, &app.config.seed).await?;
    let notice = take_notice(&session).await?;
    let view = build_view(&app.tables, &state, &app.config, query.selection(), notice);
    Ok(Html(render_page(&view)))
}

/// `GET /api/view`: the render tree as JSON. Leaves a pending notice in place.
pub async fn api_view(
    State(app): State<AppState>,
    session: Session,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<DraftView>, WebError> {
    let state = load_or_init(&session, &app.config.seed).await?;
    let notice = session.get::<String>(SESSION_NOTICE_KEY).await?;
    Ok(Json(build_view(
        &app.tables,
        &state,
        &app.config,
        query.selection(),
        notice,
    )))
}

/// `POST /remove`
pub async fn remove(
    State(app): State<AppState>,
    session: Session,
    Form(form): Form<NameForm>,
) -> Result<Redirect, WebError> {
    let selection = ViewSelection::from_query(form.off.as_deref(), form.def.as_deref());
    run_command(&app, &session, Command::RemovePlayer { name: form.name }, selection).await
}

/// `POST /undo`
pub async fn undo(
    State(app): State<AppState>,
    session: Session,
    Form(form): Form<NameForm>,
) -> Result<Redirect, WebError> {
    let selection = ViewSelection::from_query(form.off.as_deref(), form.def.as_deref());
    run_command(&app, &session, Command::UndoPlayer { name: form.name }, selection).await
}

/// `POST /pick`
pub async fn pick(
    State(app): State<AppState>,
    session: Session,
    Form(form): Form<PickForm>,
) -> Result<Redirect, WebError> {
    let selection = ViewSelection::from_query(form.off.as_deref(), form.def.as_deref());
    let cmd = Command::PickPlayer {
        round: form.round,
        name: form.name,
    };
    run_command(&app, &session, cmd, selection).await
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// Apply `cmd` to the session's state and redirect back to the page.
/// Rejections are stored as the next render's notice.
async fn run_command(
    app: &AppState,
    session: &Session,
    cmd: Command,
    selection: ViewSelection,
) -> Result<Redirect, WebError> {
    let mut state = load_or_init(session, &app.config.seed).await?;

    match command::apply(&mut state, &app.tables, &app.config.board, cmd) {
        Ok(Outcome::Applied) => store(session, &state).await?,
        Ok(Outcome::Unchanged) => {}
        Err(e) => {
            debug!("Rejected command: {}", e);
            session.insert(SESSION_NOTICE_KEY, e.to_string()).await?;
        }
    }

    Ok(Redirect::to(&view_location(selection)))
}

/// Page URL that keeps the current position selections.
pub fn view_location(selection: ViewSelection) -> String {
    format!("/?off={}&def={}", selection.offense, selection.defense)
}
