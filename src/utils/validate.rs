use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FieldErrors;
use crate::models::users::entities::UserRole;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("Invalid username regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 -]{2,19}$").expect("Invalid phone regex"));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("Invalid time regex"));

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_STATUS_LEN: usize = 20;
pub const MAX_NAME_LEN: usize = 150;

/// 向字段错误表追加一条错误
pub fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 150
    let len = username.chars().count();
    if !(3..=MAX_NAME_LEN).contains(&len) {
        return Err("Username length must be between 3 and 150 characters");
    }
    // 用户名格式校验：字母、数字以及 @ . + - _
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, numbers and @/./+/-/_ characters");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 不能全部为数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.push("Password cannot be entirely numeric");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "password1",
        "iloveyou",
        "11111111",
        "abc12345",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_role(role: &str) -> Result<UserRole, &'static str> {
    role.parse::<UserRole>()
        .map_err(|_| "Role must be either 'teacher' or 'student'")
}

pub fn validate_full_name(full_name: &str) -> Result<(), &'static str> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err("Full name is required");
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err("Full name must be at most 150 characters");
    }
    Ok(())
}

pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

pub fn validate_avatar_url(url: &str) -> Result<(), &'static str> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err("Avatar must be an http(s) URL");
    }
    if url.len() > MAX_TITLE_LEN {
        return Err("Avatar URL is too long");
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title is required");
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err("Title must be at most 255 characters");
    }
    Ok(())
}

pub fn validate_status(status: &str) -> Result<(), &'static str> {
    let trimmed = status.trim();
    if trimmed.is_empty() {
        return Err("Status cannot be empty");
    }
    if trimmed.chars().count() > MAX_STATUS_LEN {
        return Err("Status must be at most 20 characters");
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), &'static str> {
    if content.trim().is_empty() {
        return Err("Content cannot be empty");
    }
    Ok(())
}

/// 0 = 周日 … 6 = 周六
pub fn validate_day_of_week(day: i32) -> Result<(), &'static str> {
    if !(0..=6).contains(&day) {
        return Err("Day of week must be between 0 (Sunday) and 6 (Saturday)");
    }
    Ok(())
}

/// 解析 `HH:MM`，返回自零点起的分钟数
pub fn parse_time_of_day(time: &str) -> Result<u32, &'static str> {
    let caps = TIME_RE
        .captures(time)
        .ok_or("Time must be in HH:MM format")?;
    let hours: u32 = caps[1].parse().map_err(|_| "Time must be in HH:MM format")?;
    let minutes: u32 = caps[2].parse().map_err(|_| "Time must be in HH:MM format")?;
    Ok(hours * 60 + minutes)
}

/// 校验时间段，结束时间必须晚于开始时间
pub fn validate_time_range(start: &str, end: &str, errors: &mut FieldErrors) {
    let start_minutes = parse_time_of_day(start).map_err(|e| push_error(errors, "start_time", e));
    let end_minutes = parse_time_of_day(end).map_err(|e| push_error(errors, "end_time", e));

    if let (Ok(s), Ok(e)) = (start_minutes, end_minutes)
        && e <= s
    {
        push_error(errors, "end_time", "End time must be later than start time");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("t.teacher@school").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("longenoughphrase").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_numeric_password() {
        let result = validate_password("98765432");
        assert!(!result.is_valid);
        assert!(result.errors.contains(&"Password cannot be entirely numeric"));
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_role() {
        assert_eq!(validate_role("teacher"), Ok(UserRole::Teacher));
        assert_eq!(validate_role("student"), Ok(UserRole::Student));
        assert!(validate_role("admin").is_err());
        assert!(validate_role("").is_err());
    }

    #[test]
    fn test_day_of_week() {
        assert!(validate_day_of_week(0).is_ok());
        assert!(validate_day_of_week(6).is_ok());
        assert!(validate_day_of_week(7).is_err());
        assert!(validate_day_of_week(-1).is_err());
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("00:00"), Ok(0));
        assert_eq!(parse_time_of_day("09:30"), Ok(570));
        assert_eq!(parse_time_of_day("23:59"), Ok(1439));
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("9:30").is_err());
        assert!(parse_time_of_day("12:60").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }

    #[test]
    fn test_time_range() {
        let mut errors = FieldErrors::new();
        validate_time_range("09:00", "10:00", &mut errors);
        assert!(errors.is_empty());

        validate_time_range("10:00", "09:00", &mut errors);
        assert!(errors.contains_key("end_time"));

        let mut errors = FieldErrors::new();
        validate_time_range("bad", "10:00", &mut errors);
        assert!(errors.contains_key("start_time"));
        assert!(!errors.contains_key("end_time"));
    }

    #[test]
    fn test_title_and_status() {
        assert!(validate_title("Essay 1").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(256)).is_err());
        assert!(validate_status("pending").is_ok());
        assert!(validate_status("").is_err());
        assert!(validate_status(&"s".repeat(21)).is_err());
    }

    #[test]
    fn test_phone_and_avatar() {
        assert!(validate_phone_number("+1 555-0100").is_ok());
        assert!(validate_phone_number("phone").is_err());
        assert!(validate_avatar_url("https://cdn.example.com/a.png").is_ok());
        assert!(validate_avatar_url("ftp://x").is_err());
    }
}
