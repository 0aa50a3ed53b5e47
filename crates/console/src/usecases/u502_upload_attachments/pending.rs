use std::path::Path;

use crate::shared::api::MultipartField;

/// Файл, выбранный в форме и ещё не загруженный
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PendingAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Прочитать файл с диска
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Поле multipart-формы с заданным именем
    pub fn to_field(&self, name: &str) -> MultipartField {
        MultipartField::File {
            name: name.to_string(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(PendingAttachment::new("logo.png", vec![1]).content_type, "image/png");
        assert_eq!(
            PendingAttachment::new("blob", vec![1]).content_type,
            "application/octet-stream"
        );
    }
}
