use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use json::JsonValue;
use plotters::style::RGBColor;

use crate::error::{PixplotError, Result};

pub const DEFAULT_X_LABEL: &str = "Color In Grayscale";
pub const DEFAULT_Y_LABEL: &str = "Contain Number";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    #[default]
    Line,
    Bars,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub caption: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub color: RGBColor,
    pub style: ChartStyle,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            caption: None,
            x_label: String::from(DEFAULT_X_LABEL),
            y_label: String::from(DEFAULT_Y_LABEL),
            width: 1024,
            height: 768,
            color: RGBColor(0x1f, 0x77, 0xb4),
            style: ChartStyle::Line,
        }
    }
}

impl PlotConfig {
    /// Every key is optional, missing keys keep their default.
    pub fn from_json(json_string: &str) -> Result<PlotConfig> {
        let json = json::parse(json_string)?;
        if !json.is_object() {
            return config_error("top level value should be an object");
        }
        let mut config = PlotConfig::default();

        if !json["caption"].is_null() {
            config.caption = match json["caption"].as_str() {
                Some(val) => Some(val.to_string()),
                None => return config_error("Couldn't parse caption"),
            };
        }
        if !json["x_label"].is_null() {
            config.x_label = match json["x_label"].as_str() {
                Some(val) => val.to_string(),
                None => return config_error("Couldn't parse x_label"),
            };
        }
        if !json["y_label"].is_null() {
            config.y_label = match json["y_label"].as_str() {
                Some(val) => val.to_string(),
                None => return config_error("Couldn't parse y_label"),
            };
        }
        if !json["width"].is_null() {
            config.width = match json["width"].as_u32() {
                Some(val) if val > 0 => val,
                _ => return config_error("width should be a positive integer"),
            };
        }
        if !json["height"].is_null() {
            config.height = match json["height"].as_u32() {
                Some(val) if val > 0 => val,
                _ => return config_error("height should be a positive integer"),
            };
        }
        if !json["color"].is_null() {
            config.color = match json["color"].as_str() {
                Some(val) => color_from_hex(val)?,
                None => return config_error("Couldn't parse color"),
            };
        }
        if !json["style"].is_null() {
            config.style = match json["style"].as_str() {
                Some("line") => ChartStyle::Line,
                Some("bars") => ChartStyle::Bars,
                _ => return config_error("Not recognized style"),
            };
        }

        Ok(config)
    }

    pub fn to_json(&self) -> String {
        let mut data = JsonValue::new_object();

        if let Some(caption) = &self.caption {
            data["caption"] = caption.as_str().into();
        }
        data["x_label"] = self.x_label.as_str().into();
        data["y_label"] = self.y_label.as_str().into();
        data["width"] = self.width.into();
        data["height"] = self.height.into();
        data["color"] = color_to_hex(&self.color).into();
        data["style"] = self.style.into();

        data.to_string()
    }

    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<PlotConfig> {
        let mut file = File::open(path)?;
        let mut buff = String::new();
        file.read_to_string(&mut buff)?;

        PlotConfig::from_json(&buff)
    }

    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result {
        let mut file = File::create(path)?;
        file.write_all(self.to_json().as_bytes())?;
        Ok(())
    }
}

impl From<ChartStyle> for JsonValue {
    fn from(style: ChartStyle) -> Self {
        match style {
            ChartStyle::Line => JsonValue::String(String::from("line")),
            ChartStyle::Bars => JsonValue::String(String::from("bars")),
        }
    }
}

pub fn color_from_hex(string: &str) -> Result<RGBColor> {
    let clean_string = string.trim().trim_start_matches('#');
    if clean_string.len() != 6 || !clean_string.is_ascii() {
        return config_error("color should look like #rrggbb");
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&clean_string[range], 16)
            .map_err(|e| PixplotError::Config(format!("color channel: {}", e)))
    };

    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn color_to_hex(color: &RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

fn config_error<T>(msg: &str) -> Result<T> {
    Err(PixplotError::Config(String::from(msg)))
}
