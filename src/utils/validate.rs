use once_cell::sync::Lazy;
use regex::Regex;

use super::file_magic::validate_magic_bytes;

static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/\\\x00-\x1f]+$").expect("Invalid file name regex"));

/// 提取小写扩展名（包含点号），无扩展名时返回空串
pub fn file_extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 校验上传文件：文件名、扩展名白名单、大小上限、魔术字节
///
/// 返回 Err 时携带可直接回显给调用方的原因。
pub fn validate_upload(
    file_name: &str,
    bytes: &[u8],
    max_size: usize,
    allowed_types: &[String],
) -> Result<(), String> {
    if file_name.is_empty() || !FILE_NAME_RE.is_match(file_name) {
        return Err(format!("非法文件名: {file_name}"));
    }

    let extension = file_extension(file_name);
    if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
        return Err(format!("不允许的文件类型: {extension}"));
    }

    if bytes.len() > max_size {
        return Err(format!(
            "文件超出大小限制: {} > {max_size} 字节",
            bytes.len()
        ));
    }

    if !validate_magic_bytes(bytes, &extension) {
        return Err("文件内容与扩展名不匹配".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        [".pdf", ".png", ".zip"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("report.PDF"), ".pdf");
        assert_eq!(file_extension("archive.tar.zip"), ".zip");
        assert_eq!(file_extension("noext"), "");
    }

    #[test]
    fn test_accepts_valid_pdf() {
        assert!(validate_upload("report.pdf", b"%PDF-1.7 data", 1024, &allowed()).is_ok());
    }

    #[test]
    fn test_rejects_disallowed_extension() {
        let err = validate_upload("run.exe", b"MZ", 1024, &allowed()).unwrap_err();
        assert!(err.contains(".exe"));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err = validate_upload("report.pdf", b"%PDF-1.7 data", 4, &allowed()).unwrap_err();
        assert!(err.contains("大小限制"));
    }

    #[test]
    fn test_rejects_mismatched_magic() {
        assert!(validate_upload("image.png", b"%PDF-1.7", 1024, &allowed()).is_err());
    }

    #[test]
    fn test_rejects_path_traversal_name() {
        assert!(validate_upload("../../etc/passwd.pdf", b"%PDF", 1024, &allowed()).is_err());
        assert!(validate_upload("a\\b.pdf", b"%PDF", 1024, &allowed()).is_err());
    }
}
