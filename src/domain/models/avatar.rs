use rand::{Rng, distributions::Alphanumeric};
use serde::Serialize;

use crate::domain::{error::ConfigurationError, models::user::UserId};

pub const DEFAULT_AVATAR_SIZE: u32 = 52;
pub const DEFAULT_GRAVATAR_SIZE: u32 = 60;

/// Initials used when the user has no id yet.
pub const PLACEHOLDER_INITIALS: &str = "default-avatar-hash";

const BASE_FONT_SIZE: f64 = 20.0;
const AVATAR_FILENAME_LEN: usize = 40;

/// Extensions an avatar file may keep. Anything else is stored without one.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Which identity field the initials avatar is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarNameBasis {
    Name,
    #[default]
    Email,
}

/// Parameters handed to the avatar template.
#[derive(Debug, Clone, Serialize)]
pub struct AvatarView {
    pub user: AvatarOwner,
    pub size: u32,
    pub font_size: f64,
    pub initials: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvatarOwner {
    pub id: Option<i64>,
    pub username: String,
}

/// A file received from the client, already read into memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Concatenate the decimal code point of every character.
///
/// `"AB"` becomes `"6566"`.
pub fn concatenated_codes(initials: &str) -> String {
    initials.chars().map(|c| (c as u32).to_string()).collect()
}

/// Numeric hash of the initials, or `None` when it does not fit in a `u64`.
pub fn initials_hash(initials: &str) -> Option<u64> {
    concatenated_codes(initials).parse().ok()
}

/// `hash(initials) mod len`, reduced digit by digit so arbitrarily long
/// initials never overflow.
pub fn palette_index(initials: &str, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let modulus = len as u64;
    if let Some(hash) = initials_hash(initials) {
        return Some((hash % modulus) as usize);
    }
    let index = concatenated_codes(initials)
        .bytes()
        .fold(0u64, |acc, digit| (acc * 10 + u64::from(digit - b'0')) % modulus);
    Some(index as usize)
}

pub fn background_color<'a>(initials: &str, palette: &'a [String]) -> Result<&'a str, ConfigurationError> {
    palette_index(initials, palette.len())
        .map(|i| palette[i].as_str())
        .ok_or(ConfigurationError::EmptyAvatarPalette)
}

pub fn font_size_for(size: u32) -> f64 {
    BASE_FONT_SIZE * f64::from(size) / f64::from(DEFAULT_AVATAR_SIZE)
}

/// Directory every avatar of this user lives under, with trailing slash.
pub fn avatar_prefix(id: UserId) -> String {
    format!("avatars/{}/", id.as_i64())
}

/// A fresh random storage path for an uploaded avatar.
pub fn generate_avatar_path(id: UserId, original_name: Option<&str>) -> String {
    let name: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AVATAR_FILENAME_LEN)
        .map(char::from)
        .collect();

    match original_name.and_then(extension_of) {
        Some(ext) => format!("{}{}.{}", avatar_prefix(id), name, ext),
        None => format!("{}{}", avatar_prefix(id), name),
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Whether the bytes start with a PNG, JPEG, GIF or WebP signature.
pub fn is_supported_image(bytes: &[u8]) -> bool {
    bytes.starts_with(b"\x89PNG\r\n\x1a\n")
        || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
        || (bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP")
}
