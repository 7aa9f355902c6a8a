mod assets;

use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{
    net::TcpListener,
    sync::{broadcast, mpsc, watch},
    time::{self, MissedTickBehavior},
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::{
    assets::{PaletteEntry, TileSet},
    input::{Command, Key, Keymap},
    render::Frame,
    scenario::Scenario,
    simulation::Simulation,
};

#[derive(Clone, Serialize)]
pub struct StateEnvelope {
    pub scenario: String,
    pub tick_rate_hz: u32,
    pub frame: Option<Frame>,
}

#[derive(Deserialize)]
pub struct InputRequest {
    pub key: String,
}

#[derive(Serialize)]
pub struct InputResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
}

#[derive(Serialize)]
struct PaletteResponse {
    tile_size: u32,
    entries: Vec<PaletteEntry>,
    bindings: Vec<Binding>,
}

#[derive(Serialize)]
struct Binding {
    key: &'static str,
    command: Command,
}

struct AppState {
    commands: mpsc::Sender<Command>,
    broadcaster: broadcast::Sender<String>,
    latest_frame: watch::Receiver<Option<Arc<Frame>>>,
    tiles: Arc<TileSet>,
    keymap: Keymap,
    scenario_name: String,
    tick_rate_hz: u32,
    tile_size: u32,
}

pub struct WebServerConfig {
    pub scenario: Scenario,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        scenario,
        host,
        port,
    } = config;

    let simulation = Simulation::from_scenario(&scenario)?;
    let tiles = simulation.tiles().clone();

    let (command_tx, command_rx) = mpsc::channel::<Command>(64);
    let (frame_tx, _) = broadcast::channel::<String>(64);
    let (latest_tx, latest_rx) = watch::channel::<Option<Arc<Frame>>>(None);

    let period = Duration::from_millis(scenario.tick_interval_ms());
    let sim_handle = tokio::spawn(simulate(
        simulation,
        command_rx,
        frame_tx.clone(),
        latest_tx,
        period,
    ));

    let scenario_label = scenario.name.clone();
    tokio::spawn(async move {
        match sim_handle.await {
            Ok(Ok(())) => info!(scenario = %scenario_label, "simulation stopped"),
            Ok(Err(err)) => error!(error = ?err, "simulation error"),
            Err(err) => error!(error = ?err, "simulation task failed"),
        }
    });

    let state = Arc::new(AppState {
        commands: command_tx,
        broadcaster: frame_tx,
        latest_frame: latest_rx,
        tiles,
        keymap: Keymap,
        scenario_name: scenario.name.clone(),
        tick_rate_hz: scenario.tick_rate_hz,
        tile_size: scenario.world.tile_size,
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/sprites/:name", get(sprite))
        .route("/api/palette", get(palette))
        .route("/api/state", get(latest_state))
        .route("/api/events", get(stream_events))
        .route("/api/input", post(input))
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Alien World live at http://{addr} (Ctrl+C to stop)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Owns the simulation. Ticks on a fixed timer and applies commands between
/// ticks, so the world is only ever touched from this task.
async fn simulate(
    mut simulation: Simulation,
    mut commands: mpsc::Receiver<Command>,
    frames: broadcast::Sender<String>,
    latest: watch::Sender<Option<Arc<Frame>>>,
    period: Duration,
) -> Result<()> {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    publish(&simulation, &frames, &latest);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                simulation.step()?;
                publish(&simulation, &frames, &latest);
            }
            command = commands.recv() => match command {
                Some(command) => {
                    simulation.apply(command);
                }
                None => break,
            },
        }
    }
    Ok(())
}

fn publish(
    simulation: &Simulation,
    frames: &broadcast::Sender<String>,
    latest: &watch::Sender<Option<Arc<Frame>>>,
) {
    let frame = Arc::new(simulation.frame());
    match serde_json::to_string(frame.as_ref()) {
        // No subscribers is fine; the page may not be open.
        Ok(payload) => {
            let _ = frames.send(payload);
        }
        Err(err) => warn!(error = %err, "failed to encode frame"),
    }
    latest.send_replace(Some(frame));
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down web UI");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        assets::STYLES_CSS,
    )
}

async fn script() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        assets::APP_JS,
    )
}

async fn sprite(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    let stem = name.strip_suffix(".png").unwrap_or(&name);
    match state.tiles.sprite(stem) {
        Some(sprite) => (
            [(header::CONTENT_TYPE, "image/png")],
            Body::from(sprite.png.clone()),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn palette(State(state): State<Arc<AppState>>) -> Json<PaletteResponse> {
    Json(PaletteResponse {
        tile_size: state.tile_size,
        entries: state.tiles.palette(),
        bindings: state
            .keymap
            .bindings()
            .into_iter()
            .map(|(key, command)| Binding { key, command })
            .collect(),
    })
}

async fn latest_state(State(state): State<Arc<AppState>>) -> Json<StateEnvelope> {
    let frame = state.latest_frame.borrow().as_deref().cloned();
    Json(StateEnvelope {
        scenario: state.scenario_name.clone(),
        tick_rate_hz: state.tick_rate_hz,
        frame,
    })
}

async fn input(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InputRequest>,
) -> Response {
    let key = Key::parse(&request.key);
    let Some(command) = state.keymap.command_for(&key) else {
        debug!(?key, "ignoring unbound key");
        return (
            StatusCode::OK,
            Json(InputResponse {
                accepted: false,
                command: None,
            }),
        )
            .into_response();
    };
    match state.commands.send(command).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(InputResponse {
                accepted: true,
                command: Some(command),
            }),
        )
            .into_response(),
        Err(_) => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
