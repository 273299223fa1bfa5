use crate::api::Backend;
use crate::error::ClientError;
use crate::model::NewEntry;

/// Raw text of the manual entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualEntryFields {
    pub name: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub sugar: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Name,
    Calories,
    Protein,
    Carbs,
    Fat,
    Sugar,
}

impl ManualEntryFields {
    pub fn get(&self, field: ManualField) -> &str {
        match field {
            ManualField::Name => &self.name,
            ManualField::Calories => &self.calories,
            ManualField::Protein => &self.protein,
            ManualField::Carbs => &self.carbs,
            ManualField::Fat => &self.fat,
            ManualField::Sugar => &self.sugar,
        }
    }

    pub fn set(&mut self, field: ManualField, value: String) {
        let slot = match field {
            ManualField::Name => &mut self.name,
            ManualField::Calories => &mut self.calories,
            ManualField::Protein => &mut self.protein,
            ManualField::Carbs => &mut self.carbs,
            ManualField::Fat => &mut self.fat,
            ManualField::Sugar => &mut self.sugar,
        };
        *slot = value;
    }

    /// Numbers are read leniently: the longest numeric prefix counts and
    /// anything unreadable becomes 0. Nothing is rejected.
    pub fn to_new_entry(&self) -> NewEntry {
        NewEntry {
            name: self.name.clone(),
            calories: parse_int_prefix(&self.calories).unwrap_or(0),
            protein: parse_float_prefix(&self.protein).unwrap_or(0.0),
            carbs: parse_float_prefix(&self.carbs).unwrap_or(0.0),
            fat: parse_float_prefix(&self.fat).unwrap_or(0.0),
            sugar: parse_float_prefix(&self.sugar).unwrap_or(0.0),
            details: None,
        }
    }
}

pub async fn submit_manual_entry<B: Backend + ?Sized>(
    backend: &B,
    fields: &ManualEntryFields,
) -> Result<(), ClientError> {
    let entry = fields.to_new_entry();
    backend.create_entry(&entry).await?;
    log::info!("Added manual entry '{}'", entry.name);
    Ok(())
}

/// Leading integer of `text`, e.g. `"250 kcal"` gives 250 and `"12.9"` gives 12.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    text[..end].parse().ok()
}

/// Leading decimal number of `text`, e.g. `"3.5g"` gives 3.5.
/// Non-finite results count as unreadable.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if mantissa_digits > 0 || frac_end > frac_start {
            mantissa_digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when it has digits.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
