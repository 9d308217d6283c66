//! Single-image greyscale conversion: decode, luma, resolve, encode.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::error::{ConversionError, ConversionOutcome};

use super::resolve::{extension_of, resolve_output_path};

/// Converts one image and reports where the result was written.
///
/// This is the unit of work a pool worker runs for every path in its chunk.
/// Failures must come back as `Err`; a panic takes the whole worker down.
pub trait Convert: Send + Sync {
    fn convert(&self, source: &Path, destination: Option<&Path>) -> ConversionOutcome<PathBuf>;
}

/// Greyscale transformer backed by the `image` codecs.
///
/// Luma is computed with `image`'s `to_luma8`, which applies the Rec. 709
/// weights `0.2126 R + 0.7152 G + 0.0722 B` and drops any alpha channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTransformer;

impl ImageTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Convert `source` to greyscale and write it.
    ///
    /// The output goes to `destination` when given, otherwise it replaces the
    /// file next to the source. Returns the written path.
    pub fn transform(
        &self,
        source: &Path,
        destination: Option<&Path>,
    ) -> ConversionOutcome<PathBuf> {
        tracing::debug!("Transforming {:?}", source);

        let image = decode(source)?;
        let grey = to_luma(&image);
        drop(image);

        let output = resolve_output_path(source, destination);
        encode(&grey, &output)?;

        tracing::trace!("  Wrote {:?}", output);
        Ok(output)
    }
}

impl Convert for ImageTransformer {
    fn convert(&self, source: &Path, destination: Option<&Path>) -> ConversionOutcome<PathBuf> {
        self.transform(source, destination)
    }
}

/// Reduce an image to a single 8-bit luma channel.
pub fn to_luma(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

/// Decode an image, sniffing the format from content and falling back to the
/// extension.
fn decode(path: &Path) -> ConversionOutcome<DynamicImage> {
    let decode_err = |message: String| ConversionError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = ImageReader::open(path)
        .map_err(|e| decode_err(format!("Cannot open file: {e}")))?
        .with_guessed_format()
        .map_err(|e| decode_err(format!("Cannot detect image format: {e}")))?;

    if reader.format().is_none() {
        let format = ImageFormat::from_path(path)
            .map_err(|_| decode_err("Unrecognised image format".to_string()))?;
        reader.set_format(format);
    }

    match catch_unwind(AssertUnwindSafe(|| reader.decode())) {
        Ok(Ok(image)) => Ok(image),
        Ok(Err(e)) => Err(decode_err(e.to_string())),
        Err(payload) => Err(decode_err(format!(
            "Codec panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

/// Encode `grey` in the format named by the output extension.
fn encode(grey: &DynamicImage, output: &Path) -> ConversionOutcome<()> {
    let format = ImageFormat::from_path(output).map_err(|_| ConversionError::UnsupportedFormat {
        path: output.to_path_buf(),
        extension: output
            .file_name()
            .and_then(|n| n.to_str())
            .map(extension_of)
            .unwrap_or_default(),
    })?;

    let write_err = |message: String| ConversionError::Write {
        path: output.to_path_buf(),
        message,
    };

    // The GIF encoder has no 8-bit grey mode; equal RGBA channels keep it grey.
    let expanded;
    let encodable = if format == ImageFormat::Gif {
        expanded = DynamicImage::ImageRgba8(grey.to_rgba8());
        &expanded
    } else {
        grey
    };

    match catch_unwind(AssertUnwindSafe(|| {
        encodable.save_with_format(output, format)
    })) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(write_err(e.to_string())),
        Err(payload) => Err(write_err(format!(
            "Codec panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
