//! JSON REST handlers for the display mode and its palettes.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use tidydo_app::ports::{KeyValueStore, TodoRepository};
use tidydo_domain::display_mode::DisplayMode;
use tidydo_domain::palette::{Palette, Theme, resolve};

use crate::error::ApiError;
use crate::state::AppState;

/// The display mode as seen by clients.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisplayModeBody {
    pub mode: &'static str,
    pub is_dark_mode: bool,
}

impl From<DisplayMode> for DisplayModeBody {
    fn from(mode: DisplayMode) -> Self {
        Self {
            mode: mode.as_str(),
            is_dark_mode: mode.is_dark(),
        }
    }
}

/// The active mode and the palette to render with.
#[derive(Serialize)]
pub struct ThemeBody {
    #[serde(flatten)]
    pub display_mode: DisplayModeBody,
    pub palette: &'static Palette,
}

impl From<Theme> for ThemeBody {
    fn from(theme: Theme) -> Self {
        Self {
            display_mode: theme.mode.into(),
            palette: theme.palette,
        }
    }
}

/// `GET /api/preferences/display-mode`
pub async fn display_mode<R, S>(State(state): State<AppState<R, S>>) -> Json<DisplayModeBody>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    Json(state.preferences.current_mode().into())
}

/// `POST /api/preferences/display-mode/toggle`
///
/// Answers with the new mode right away; the write to storage continues in
/// the background.
pub async fn toggle<R, S>(State(state): State<AppState<R, S>>) -> Json<DisplayModeBody>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let toggled = state.preferences.toggle();
    Json(toggled.mode().into())
}

/// `GET /api/theme`
pub async fn theme<R, S>(State(state): State<AppState<R, S>>) -> Json<ThemeBody>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    Json(state.preferences.theme().into())
}

/// `GET /api/palettes/{mode}` — `light` or `dark`.
pub async fn palette(Path(mode): Path<String>) -> Result<Json<&'static Palette>, ApiError> {
    let mode = DisplayMode::from_str(&mode)?;
    Ok(Json(resolve(mode)))
}
