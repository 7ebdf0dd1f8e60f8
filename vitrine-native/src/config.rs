use anyhow::Context;
use serde::Deserialize;

//
// ──────────────────────────────────────────────────────────────
//   Station configuration
//
//   The showroom stations (button label + colour, and the camera
//   pose the button flies to) ship as an embedded JSON document.
//   A parse failure is a startup error, not a runtime one.
// ──────────────────────────────────────────────────────────────
//

const STATIONS_JSON: &str = include_str!("../assets/stations.json");

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig
{
  pub label: String,
  pub color: [f32; 3],
  pub position: [f32; 3],
  pub target: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowroomConfig
{
  pub stations: Vec<StationConfig>,
}

pub fn load() -> anyhow::Result<ShowroomConfig>
{
  let config: ShowroomConfig =
    serde_json::from_str(STATIONS_JSON).context("parsing embedded assets/stations.json")?;

  anyhow::ensure!(!config.stations.is_empty(), "station config must list at least one station");

  log::info!("loaded {} stations", config.stations.len());

  Ok(config)
}

//
// ──────────────────────────────────────────────────────────────
//   Tests
// ──────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn embedded_config_parses()
  {
    let config = load().unwrap();

    assert_eq!(config.stations.len(), 4);
    assert_eq!(config.stations[0].label, "Projects");
    assert_eq!(config.stations[3].label, "Credits");
  }

  #[test]
  fn station_poses_match_showroom_layout()
  {
    let config = load().unwrap();

    assert_eq!(config.stations[0].position, [0.0, 2.0, 0.0]);
    assert_eq!(config.stations[0].target, [0.0, -10.0, -50.0]);
    assert_eq!(config.stations[2].position, [-1.0, 4.0, -10.0]);
    assert_eq!(config.stations[3].target, [0.0, 0.0, 0.0]);
  }
}
