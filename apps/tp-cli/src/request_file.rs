//! Request loading and path export.

use crate::error::{CliError, CliResult};
use std::path::Path;
use tp_process::{ProcessState, SimulationRequest};

/// Load a request from YAML, or JSON when the extension is `.json`.
pub fn load_request(path: &Path) -> CliResult<SimulationRequest> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::RequestRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_request(&content, is_json(path)).map_err(|message| CliError::RequestParse {
        path: path.to_path_buf(),
        message,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_request(content: &str, json: bool) -> Result<SimulationRequest, String> {
    if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Path points as CSV with a header row.
pub fn path_csv(path: &[ProcessState]) -> String {
    let mut csv = String::from("v_m3,p_pa,t_k\n");
    for s in path {
        csv.push_str(&format!("{},{},{}\n", s.v_m3, s.p_pa, s.t_k));
    }
    csv
}

pub fn write_path_csv(out: &Path, path: &[ProcessState]) -> CliResult<()> {
    std::fs::write(out, path_csv(path)).map_err(|e| CliError::OutputWrite {
        path: out.to_path_buf(),
        source: e,
    })
}
