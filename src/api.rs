use std::time::Instant;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::parse::{self, ParseError};
use crate::{Timing, render};

/// Either `input` in the text format, or `rows`/`cols`/`cells` with one string
/// of cell tokens per row. A short row leaves its trailing cells dead.
/// `generations` overrides the text header.
#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    pub input: Option<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub generations: Option<usize>,
    pub cells: Option<Vec<String>>,
    /// Pixels per cell; requests a PNG of the final grid when set.
    pub scale: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub rows: usize,
    pub cols: usize,
    pub generations: usize,
    pub initial_population: usize,
    pub population: usize,
    pub grid: String,
    pub image: Option<String>,
    pub timings: Vec<TimingEntry>,
}

#[derive(Debug, Serialize)]
pub struct TimingEntry {
    pub name: String,
    pub ms: f64,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("request needs either `input` or `rows`, `cols` and `cells`")]
    MissingInput,
    #[error("scale {scale} is too large for a {rows}x{cols} image")]
    ImageTooLarge { scale: u32, rows: usize, cols: usize },
    #[error("PNG encode failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("simulation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Parse(_) | ApiError::MissingInput | ApiError::ImageTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Encode(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("Rejected request: {}", self);
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn encode_png(rgba: &[u8], w: u32, h: u32) -> Result<String, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w, h, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

pub fn simulate(req: &SimulateRequest) -> Result<SimulateResponse, ApiError> {
    let (run, mut timings) = match (&req.input, req.rows, req.cols, &req.cells) {
        (Some(text), ..) => crate::simulate(text, req.generations)?,
        (None, Some(rows), Some(cols), Some(cells)) => {
            parse::check_size(rows, cols)?;
            let config = Config::new(rows, cols, req.generations.unwrap_or(0));
            let lines = cells.iter().map(String::as_str);
            crate::evolve(config, parse::parse_rows(lines, rows, cols))
        }
        _ => return Err(ApiError::MissingInput),
    };

    let image = match req.scale {
        Some(scale) if !run.grid.data.is_empty() => {
            let t = Instant::now();
            let too_large = || ApiError::ImageTooLarge {
                scale,
                rows: run.grid.rows,
                cols: run.grid.cols,
            };
            let (w, h) = render::image_size(&run.grid, scale).ok_or_else(too_large)?;
            let rgba = render::render_rgba(&run.grid, scale).ok_or_else(too_large)?;
            let url = encode_png(&rgba, w, h)?;
            timings.push(Timing {
                name: "render",
                ms: t.elapsed().as_secs_f64() * 1000.0,
            });
            Some(url)
        }
        _ => None,
    };

    Ok(SimulateResponse {
        rows: run.config.rows,
        cols: run.config.cols,
        generations: run.config.max_generations,
        initial_population: run.initial_population,
        population: run.population,
        grid: render::render_text(&run.grid),
        image,
        timings: timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input() {
        let req = SimulateRequest {
            input: Some("3 3 1\n. * .\n. * .\n. * .\n".into()),
            ..Default::default()
        };
        let resp = simulate(&req).unwrap();
        assert_eq!(resp.grid, ". . .\n* * *\n. . .\n");
        assert_eq!(resp.population, 3);
        assert!(resp.image.is_none());
    }

    #[test]
    fn generations_override_header() {
        let req = SimulateRequest {
            input: Some("3 3 1\n. * .\n. * .\n. * .\n".into()),
            generations: Some(2),
            ..Default::default()
        };
        let resp = simulate(&req).unwrap();
        assert_eq!(resp.generations, 2);
        assert_eq!(resp.grid, ". * .\n. * .\n. * .\n");
    }

    #[test]
    fn structured_cells() {
        let req = SimulateRequest {
            rows: Some(4),
            cols: Some(4),
            generations: Some(3),
            cells: Some(vec![
                ". . . .".into(),
                ". * * .".into(),
                ". * * .".into(),
                ". . . .".into(),
            ]),
            ..Default::default()
        };
        let resp = simulate(&req).unwrap();
        assert_eq!(resp.grid, ". . . .\n. * * .\n. * * .\n. . . .\n");
        assert_eq!(resp.initial_population, 4);
        assert_eq!(resp.population, 4);
    }

    #[test]
    fn structured_rows_do_not_shift() {
        let req = SimulateRequest {
            rows: Some(2),
            cols: Some(3),
            cells: Some(vec!["* *".into(), ". . *".into()]),
            ..Default::default()
        };
        let resp = simulate(&req).unwrap();
        assert_eq!(resp.grid, "* * .\n. . *\n");
    }

    #[test]
    fn structured_size_is_checked() {
        let req = SimulateRequest {
            rows: Some(usize::MAX),
            cols: Some(2),
            cells: Some(vec![]),
            ..Default::default()
        };
        let err = simulate(&req).unwrap_err();
        assert!(matches!(err, ApiError::Parse(ParseError::TooLarge { .. })));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn oversized_scale_is_rejected() {
        for scale in [u32::MAX, render::MAX_SCALE + 1] {
            let req = SimulateRequest {
                input: Some("1 1 0 *".into()),
                scale: Some(scale),
                ..Default::default()
            };
            let err = simulate(&req).unwrap_err();
            assert!(matches!(err, ApiError::ImageTooLarge { .. }), "scale {scale}");
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn errors_render_as_json_body() {
        let req = SimulateRequest {
            input: Some("3 x 1".into()),
            ..Default::default()
        };
        let response = simulate(&req).unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("`x`"));
    }

    #[test]
    fn png_data_url() {
        let req = SimulateRequest {
            input: Some("2 2 0 * . . *".into()),
            scale: Some(2),
            ..Default::default()
        };
        let resp = simulate(&req).unwrap();
        let url = resp.image.unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(resp.timings.iter().any(|t| t.name == "render"));
    }

    #[test]
    fn missing_input() {
        let req = SimulateRequest {
            rows: Some(2),
            ..Default::default()
        };
        assert!(matches!(simulate(&req), Err(ApiError::MissingInput)));
    }

    #[test]
    fn bad_header_is_reported() {
        let req = SimulateRequest {
            input: Some("three 3 1".into()),
            ..Default::default()
        };
        let err = simulate(&req).unwrap_err();
        assert!(matches!(err, ApiError::Parse(ParseError::InvalidHeader { .. })));
        assert!(err.to_string().contains("three"));
    }

    #[test]
    fn request_deserializes_from_json() {
        let req: SimulateRequest =
            serde_json::from_str(r#"{"input": "1 1 0 *", "scale": 4}"#).unwrap();
        assert_eq!(req.scale, Some(4));
        let resp = simulate(&req).unwrap();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["grid"], "*\n");
        assert_eq!(json["population"], 1);
    }
}
