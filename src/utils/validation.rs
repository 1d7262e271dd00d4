use crate::error::{AppError, AppResult};
use regex::Regex;

/// Lowest/highest ticket number a raffle can hand out.
pub const TICKET_MIN: i32 = 1;
pub const TICKET_MAX: i32 = 500;

/// Participant names carry letters and spaces only.
pub fn validate_participant_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("Name is required".to_string()));
    }

    let name_regex = Regex::new(r"^[\p{L} ]+$").unwrap();
    if !name_regex.is_match(name) {
        return Err(AppError::ValidationError(
            "Name may only contain letters and spaces".to_string(),
        ));
    }

    Ok(())
}

/// Cedulas are exactly 10 digits.
pub fn validate_cedula(cedula: &str) -> AppResult<()> {
    let cedula_regex = Regex::new(r"^[0-9]{10}$").unwrap();

    if !cedula_regex.is_match(cedula) {
        return Err(AppError::ValidationError(
            "Cedula must be exactly 10 digits".to_string(),
        ));
    }

    Ok(())
}

/// Ticket numbers are 3-digit strings whose value lies in [1, 500].
/// Returns the parsed value so callers can reuse it for range checks.
pub fn validate_ticket_number(ticket: &str) -> AppResult<i32> {
    let ticket_regex = Regex::new(r"^[0-9]{3}$").unwrap();

    if !ticket_regex.is_match(ticket) {
        return Err(AppError::ValidationError(
            "Ticket number must be exactly 3 digits".to_string(),
        ));
    }

    let value: i32 = ticket
        .parse()
        .map_err(|_| AppError::ValidationError("Ticket number is not numeric".to_string()))?;

    if !(TICKET_MIN..=TICKET_MAX).contains(&value) {
        return Err(AppError::ValidationError(format!(
            "Ticket number must be between {TICKET_MIN:03} and {TICKET_MAX}"
        )));
    }

    Ok(value)
}

pub fn validate_prize_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Prize name is required".to_string(),
        ));
    }
    Ok(())
}

/// Prize ranges are inclusive ticket intervals inside [1, 500].
pub fn validate_ticket_range(range_start: i32, range_end: i32) -> AppResult<()> {
    if !(TICKET_MIN..=TICKET_MAX).contains(&range_start)
        || !(TICKET_MIN..=TICKET_MAX).contains(&range_end)
    {
        return Err(AppError::ValidationError(format!(
            "Ticket range must lie between {TICKET_MIN:03} and {TICKET_MAX}"
        )));
    }

    if range_start > range_end {
        return Err(AppError::ValidationError(
            "range_start must not be greater than range_end".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_participant_name() {
        assert!(validate_participant_name("Maria Fernanda").is_ok());
        assert!(validate_participant_name("José Núñez").is_ok());
        assert!(validate_participant_name("").is_err());
        assert!(validate_participant_name("   ").is_err());
        assert!(validate_participant_name("Maria123").is_err());
        assert!(validate_participant_name("Ana-Lucia").is_err());
    }

    #[test]
    fn test_validate_cedula() {
        assert!(validate_cedula("1234567890").is_ok());
        assert!(validate_cedula("123456789").is_err());
        assert!(validate_cedula("12345678901").is_err());
        assert!(validate_cedula("12345678ab").is_err());
        assert!(validate_cedula("").is_err());
    }

    #[test]
    fn test_validate_ticket_number() {
        assert_eq!(validate_ticket_number("001").unwrap(), 1);
        assert_eq!(validate_ticket_number("150").unwrap(), 150);
        assert_eq!(validate_ticket_number("500").unwrap(), 500);
        assert!(validate_ticket_number("000").is_err());
        assert!(validate_ticket_number("501").is_err());
        assert!(validate_ticket_number("50").is_err());
        assert!(validate_ticket_number("1500").is_err());
        assert!(validate_ticket_number("15a").is_err());
    }

    #[test]
    fn test_validate_ticket_range() {
        assert!(validate_ticket_range(1, 500).is_ok());
        assert!(validate_ticket_range(100, 200).is_ok());
        assert!(validate_ticket_range(150, 150).is_ok());
        assert!(validate_ticket_range(0, 100).is_err());
        assert!(validate_ticket_range(1, 501).is_err());
        assert!(validate_ticket_range(200, 100).is_err());
    }

    #[test]
    fn test_validate_prize_name() {
        assert!(validate_prize_name("Smart TV 55\"").is_ok());
        assert!(validate_prize_name("").is_err());
        assert!(validate_prize_name("  ").is_err());
    }
}
