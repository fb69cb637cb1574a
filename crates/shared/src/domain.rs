use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::InvalidMeasurements, protocol::Measurements};

/// Which of the two upload slots an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    User,
    Clothing,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 2] = [ImageSlot::User, ImageSlot::Clothing];

    pub fn heading(self) -> &'static str {
        match self {
            ImageSlot::User => "Your Photo",
            ImageSlot::Clothing => "Clothing Item",
        }
    }

    pub fn upload_prompt(self) -> &'static str {
        match self {
            ImageSlot::User => "Click or drag file to upload your photo",
            ImageSlot::Clothing => "Click or drag file to upload clothing image",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            ImageSlot::User => crate::protocol::USER_IMAGE_FIELD,
            ImageSlot::Clothing => crate::protocol::CLOTHING_IMAGE_FIELD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeLabel {
    XS,
    S,
    M,
    L,
    XL,
}

impl SizeLabel {
    /// Coarse size from shoulder width in pixels.
    pub fn from_shoulder_width(shoulder_width: f64) -> Self {
        if shoulder_width < 380.0 {
            SizeLabel::XS
        } else if shoulder_width < 400.0 {
            SizeLabel::S
        } else if shoulder_width < 420.0 {
            SizeLabel::M
        } else if shoulder_width < 440.0 {
            SizeLabel::L
        } else {
            SizeLabel::XL
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeLabel::XS => "XS",
            SizeLabel::S => "S",
            SizeLabel::M => "M",
            SizeLabel::L => "L",
            SizeLabel::XL => "XL",
        }
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    Slim,
    Regular,
    Athletic,
    Broad,
}

impl BodyType {
    pub fn from_shoulder_to_chest_ratio(ratio: f64) -> Self {
        if ratio < 0.8 {
            BodyType::Slim
        } else if ratio < 1.0 {
            BodyType::Regular
        } else if ratio < 1.2 {
            BodyType::Athletic
        } else {
            BodyType::Broad
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BodyType::Slim => "Slim",
            BodyType::Regular => "Regular",
            BodyType::Athletic => "Athletic",
            BodyType::Broad => "Broad",
        }
    }

    pub fn fit_tip(self) -> &'static str {
        match self {
            BodyType::Slim => "Consider fitted or slim-cut styles",
            BodyType::Regular => "Most standard cuts will fit well",
            BodyType::Athletic => "Look for styles with room in shoulders",
            BodyType::Broad => "Choose relaxed fits for comfort",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthAdvice {
    Standard,
    Regular,
    Longer,
}

impl LengthAdvice {
    pub fn from_torso_height(torso_height: f64) -> Self {
        if torso_height < 400.0 {
            LengthAdvice::Standard
        } else if torso_height < 450.0 {
            LengthAdvice::Regular
        } else {
            LengthAdvice::Longer
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthAdvice::Standard => "Standard length should work well",
            LengthAdvice::Regular => "Consider regular fit length",
            LengthAdvice::Longer => "You might prefer longer cuts",
        }
    }
}

/// Measurements that passed validation: every value present and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMeasurements {
    pub shoulder_width: f64,
    pub torso_height: f64,
    pub chest_width: f64,
    pub shoulder_to_chest_ratio: f64,
    pub torso_aspect_ratio: f64,
}

impl TryFrom<Measurements> for BodyMeasurements {
    type Error = InvalidMeasurements;

    fn try_from(raw: Measurements) -> Result<Self, Self::Error> {
        let valid = |value: Option<f64>| value.filter(|v| v.is_finite()).ok_or(InvalidMeasurements);
        Ok(Self {
            shoulder_width: valid(raw.shoulder_width)?,
            torso_height: valid(raw.torso_height)?,
            chest_width: valid(raw.chest_width)?,
            shoulder_to_chest_ratio: valid(raw.shoulder_to_chest_ratio)?,
            torso_aspect_ratio: valid(raw.torso_aspect_ratio)?,
        })
    }
}

/// Everything the measurements panel derives from one backend response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementSummary {
    pub measurements: BodyMeasurements,
    pub size: SizeLabel,
    pub body_type: BodyType,
    pub length_advice: LengthAdvice,
}

impl MeasurementSummary {
    pub fn from_measurements(raw: Measurements) -> Result<Self, InvalidMeasurements> {
        let measurements = BodyMeasurements::try_from(raw)?;
        Ok(Self {
            measurements,
            size: SizeLabel::from_shoulder_width(measurements.shoulder_width),
            body_type: BodyType::from_shoulder_to_chest_ratio(
                measurements.shoulder_to_chest_ratio,
            ),
            length_advice: LengthAdvice::from_torso_height(measurements.torso_height),
        })
    }

    /// Label/value rows in display order. Pixel values get one decimal,
    /// ratios two.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let m = &self.measurements;
        vec![
            ("Shoulder Width", format!("{:.1} px", m.shoulder_width)),
            ("Chest Width", format!("{:.1} px", m.chest_width)),
            ("Torso Height", format!("{:.1} px", m.torso_height)),
            (
                "Shoulder/Chest Ratio",
                format!("{:.2}", m.shoulder_to_chest_ratio),
            ),
            ("Torso Ratio", format!("{:.2}", m.torso_aspect_ratio)),
        ]
    }

    pub fn fit_tips(&self) -> [String; 2] {
        [
            format!("{} build: {}", self.body_type, self.body_type.fit_tip()),
            format!(
                "Recommended length based on torso height: {}",
                self.length_advice.as_str()
            ),
        ]
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
