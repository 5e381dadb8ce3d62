/// Submission forms
///
/// Both stages are plain field bags that fill one slot at a time and
/// only convert to a wire payload once every required field is present.
/// Validation happens here, before any network call.

use crate::api::types::{Day2Payload, HomeworkPayload};
use crate::labels;
use crate::photo::UploadedImage;

/// Day-1 image slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    BaseReference,
    Angle1,
    Angle2,
    Angle3,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 4] = [
        ImageSlot::BaseReference,
        ImageSlot::Angle1,
        ImageSlot::Angle2,
        ImageSlot::Angle3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImageSlot::BaseReference => labels::BASE_REF,
            ImageSlot::Angle1 => labels::ANGLE_1,
            ImageSlot::Angle2 => labels::ANGLE_2,
            ImageSlot::Angle3 => labels::ANGLE_3,
        }
    }
}

/// The day-1 homework form: a nick plus four photos
#[derive(Debug, Clone, Default)]
pub struct HomeworkForm {
    pub telegram_nick: String,
    pub base_reference: Option<UploadedImage>,
    pub angle1: Option<UploadedImage>,
    pub angle2: Option<UploadedImage>,
    pub angle3: Option<UploadedImage>,
}

impl HomeworkForm {
    pub fn image(&self, slot: ImageSlot) -> Option<&UploadedImage> {
        match slot {
            ImageSlot::BaseReference => self.base_reference.as_ref(),
            ImageSlot::Angle1 => self.angle1.as_ref(),
            ImageSlot::Angle2 => self.angle2.as_ref(),
            ImageSlot::Angle3 => self.angle3.as_ref(),
        }
    }

    pub fn set_image(&mut self, slot: ImageSlot, value: Option<UploadedImage>) {
        match slot {
            ImageSlot::BaseReference => self.base_reference = value,
            ImageSlot::Angle1 => self.angle1 = value,
            ImageSlot::Angle2 => self.angle2 = value,
            ImageSlot::Angle3 => self.angle3 = value,
        }
    }

    /// Label of the first required field that is still empty
    pub fn first_missing(&self) -> Option<&'static str> {
        if self.telegram_nick.trim().is_empty() {
            return Some(labels::TELEGRAM_NICK);
        }
        ImageSlot::ALL
            .into_iter()
            .find(|slot| self.image(*slot).is_none())
            .map(ImageSlot::label)
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    /// Wire payload, available only when the form is complete
    pub fn payload(&self) -> Option<HomeworkPayload> {
        if !self.is_complete() {
            return None;
        }
        Some(HomeworkPayload {
            telegram_nick: self.telegram_nick.trim().to_string(),
            base_reference: self.base_reference.as_ref()?.data_url.clone(),
            angle1: self.angle1.as_ref()?.data_url.clone(),
            angle2: self.angle2.as_ref()?.data_url.clone(),
            angle3: self.angle3.as_ref()?.data_url.clone(),
        })
    }

    /// Drop the photos but keep the nick (used when re-submitting)
    pub fn clear_images(&mut self) {
        self.base_reference = None;
        self.angle1 = None;
        self.angle2 = None;
        self.angle3 = None;
    }
}

/// Day-2 image slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day2Slot {
    ReceivedReference,
    Result1,
    Result2,
}

impl Day2Slot {
    pub const ALL: [Day2Slot; 3] = [
        Day2Slot::ReceivedReference,
        Day2Slot::Result1,
        Day2Slot::Result2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Day2Slot::ReceivedReference => labels::RECEIVED_REF,
            Day2Slot::Result1 => labels::RESULT_1,
            Day2Slot::Result2 => labels::RESULT_2,
        }
    }
}

/// The day-2 form: the received reference plus two result shots.
/// The nick rides in from the session, not from this form.
#[derive(Debug, Clone, Default)]
pub struct Day2Form {
    pub received_reference: Option<UploadedImage>,
    pub result1: Option<UploadedImage>,
    pub result2: Option<UploadedImage>,
}

impl Day2Form {
    pub fn image(&self, slot: Day2Slot) -> Option<&UploadedImage> {
        match slot {
            Day2Slot::ReceivedReference => self.received_reference.as_ref(),
            Day2Slot::Result1 => self.result1.as_ref(),
            Day2Slot::Result2 => self.result2.as_ref(),
        }
    }

    pub fn set_image(&mut self, slot: Day2Slot, value: Option<UploadedImage>) {
        match slot {
            Day2Slot::ReceivedReference => self.received_reference = value,
            Day2Slot::Result1 => self.result1 = value,
            Day2Slot::Result2 => self.result2 = value,
        }
    }

    pub fn first_missing(&self) -> Option<&'static str> {
        Day2Slot::ALL
            .into_iter()
            .find(|slot| self.image(*slot).is_none())
            .map(Day2Slot::label)
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    pub fn payload(&self, telegram_nick: &str) -> Option<Day2Payload> {
        if telegram_nick.trim().is_empty() || !self.is_complete() {
            return None;
        }
        Some(Day2Payload::new(
            telegram_nick.trim().to_string(),
            self.received_reference.as_ref()?.data_url.clone(),
            self.result1.as_ref()?.data_url.clone(),
            self.result2.as_ref()?.data_url.clone(),
        ))
    }
}
