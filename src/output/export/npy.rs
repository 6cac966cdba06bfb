//! NumPy `.npy` persistence
//!
//! Arrays are written in format version 1.0 as little-endian `f64` (`<f8`)
//! in C order:
//!
//! ```text
//! \x93NUMPY  0x01 0x00  <u16 header length>  {'descr': '<f8', 'fortran_order': False, 'shape': (R, C), } ␣…␣\n  <data>
//! ```
//!
//! The header is padded with spaces so that the data starts on a multiple of
//! 64 bytes. The reader accepts versions 1.0 and 2.0 of the same layout.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::info;
use ndarray::{Array2, ArrayView2};

use super::{ExportError, Exporter, check_curve, check_grid};
use crate::engine::{DensityHistogram, LyapunovExponent};

/// File name of the persisted density grid
pub const DENSITY_ARRAY_FILE: &str = "logmap.npy";

/// File name of the density raster
pub const DENSITY_IMAGE_FILE: &str = "bifurcation.png";

const MAGIC: &[u8; 6] = b"\x93NUMPY";
const ALIGNMENT: usize = 64;

// =================================================================================================
// Writing
// =================================================================================================

/// `.npy` exporter
///
/// The density grid is written with shape `(n_bins, N)`, the Lyapunov curve
/// with shape `(N,)` (exponents only, the sweep is not stored).
#[derive(Debug, Clone, Copy, Default)]
pub struct NpyExporter;

impl Exporter for NpyExporter {
    type Error = ExportError;

    fn export_density(&self, histogram: &DensityHistogram, path: &str) -> Result<(), ExportError> {
        check_grid(histogram)?;
        write_npy_grid(histogram.grid.view(), path)
    }

    fn export_lyapunov(&self, exponent: &LyapunovExponent, path: &str) -> Result<(), ExportError> {
        check_curve(exponent)?;
        let mut writer = BufWriter::new(File::create(path)?);
        write_array(&mut writer, &[exponent.len()], exponent.exponents.iter().copied())?;
        writer.flush()?;
        info!("Lyapunov curve written to {}", path);
        Ok(())
    }
}

/// Write a 2-D grid to `path`
///
/// Any memory layout is accepted; values are always written in logical
/// row-major order.
pub fn write_npy_grid(grid: ArrayView2<'_, f64>, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let (rows, columns) = grid.dim();

    let mut writer = BufWriter::new(File::create(path)?);
    write_array(&mut writer, &[rows, columns], grid.iter().copied())?;
    writer.flush()?;

    info!("Array ({}, {}) written to {}", rows, columns, path.display());
    Ok(())
}

/// Persist a finalized histogram as `<directory>/logmap.npy`
///
/// Returns the path of the written file.
pub fn save_density(histogram: &DensityHistogram, directory: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    check_grid(histogram)?;
    let path = directory.as_ref().join(DENSITY_ARRAY_FILE);
    write_npy_grid(histogram.grid.view(), &path)?;
    Ok(path)
}

fn write_array<W: Write>(
    writer: &mut W,
    shape: &[usize],
    values: impl Iterator<Item = f64>,
) -> Result<(), ExportError> {
    let header = header_text(shape);

    writer.write_all(MAGIC)?;
    writer.write_all(&[1, 0])?;
    let length = u16::try_from(header.len())
        .map_err(|_| ExportError::Format(format!("header of {} bytes does not fit version 1.0", header.len())))?;
    writer.write_all(&length.to_le_bytes())?;
    writer.write_all(header.as_bytes())?;

    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

/// Header dictionary, padded so that magic + version + length + header
/// is a multiple of 64 bytes
fn header_text(shape: &[usize]) -> String {
    let shape = match shape {
        [single] => format!("({},)", single),
        dims => format!(
            "({})",
            dims.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
        ),
    };
    let mut header = format!("{{'descr': '<f8', 'fortran_order': False, 'shape': {}, }}", shape);

    let prefix = MAGIC.len() + 2 + 2;
    let unpadded = prefix + header.len() + 1;
    let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    header.extend(std::iter::repeat_n(' ', padding));
    header.push('\n');
    header
}

// =================================================================================================
// Reading
// =================================================================================================

/// Read a 2-D `<f8` C-order array written by [`write_npy_grid`] (or NumPy)
///
/// # Errors
///
/// [`ExportError::Format`] for anything other than a little-endian `f64`
/// C-order array, [`ExportError::ShapeMismatch`] for arrays that are not
/// 2-D or whose data does not match the declared shape.
pub fn read_npy_grid(path: impl AsRef<Path>) -> Result<Array2<f64>, ExportError> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);

    // ====== Preamble ======

    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(ExportError::Format("missing \\x93NUMPY magic string".to_string()));
    }

    let mut version = [0u8; 2];
    reader.read_exact(&mut version)?;
    let header_length = match version[0] {
        1 => {
            let mut bytes = [0u8; 2];
            reader.read_exact(&mut bytes)?;
            u16::from_le_bytes(bytes) as usize
        }
        2 => {
            let mut bytes = [0u8; 4];
            reader.read_exact(&mut bytes)?;
            u32::from_le_bytes(bytes) as usize
        }
        major => return Err(ExportError::Format(format!("unsupported format version {}.{}", major, version[1]))),
    };

    let mut header = Vec::new();
    (&mut reader).take(header_length as u64).read_to_end(&mut header)?;
    if header.len() != header_length {
        return Err(ExportError::Format(format!(
            "header declares {} bytes but the file ends after {}",
            header_length,
            header.len()
        )));
    }
    let header = String::from_utf8(header).map_err(|_| ExportError::Format("header is not UTF-8".to_string()))?;

    // ====== Header ======

    if !header.contains("'descr': '<f8'") {
        return Err(ExportError::Format(format!("only '<f8' arrays are supported, header was {}", header.trim())));
    }
    if !header.contains("'fortran_order': False") {
        return Err(ExportError::Format("only C-order arrays are supported".to_string()));
    }
    let shape = parse_shape(&header)?;
    let (rows, columns) = match shape.as_slice() {
        [rows, columns] => (*rows, *columns),
        other => {
            return Err(ExportError::ShapeMismatch {
                expected: "a 2-D array".to_string(),
                found: format!("{}-D array", other.len()),
            });
        }
    };

    // ====== Data ======

    // the shape comes from the file: size it without overflow, allocate only what is there
    let expected = rows
        .checked_mul(columns)
        .and_then(|cells| cells.checked_mul(8))
        .ok_or_else(|| ExportError::Format(format!("shape ({}, {}) is too large", rows, columns)))?;

    let mut bytes = Vec::new();
    reader.take(expected as u64 + 1).read_to_end(&mut bytes)?;
    if bytes.len() != expected {
        return Err(ExportError::ShapeMismatch {
            expected: format!("{} bytes of data", expected),
            found: format!("{} bytes", bytes.len()),
        });
    }

    let values: Vec<f64> = bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            f64::from_le_bytes(word)
        })
        .collect();

    Array2::from_shape_vec((rows, columns), values).map_err(|e| ExportError::ShapeMismatch {
        expected: format!("({}, {})", rows, columns),
        found: e.to_string(),
    })
}

/// Dimensions listed after `'shape':`
fn parse_shape(header: &str) -> Result<Vec<usize>, ExportError> {
    let missing = || ExportError::Format(format!("no shape in header {}", header.trim()));

    let start = header.find("'shape':").ok_or_else(missing)?;
    let rest = &header[start..];
    let open = rest.find('(').ok_or_else(missing)?;
    let close = rest.find(')').ok_or_else(missing)?;

    rest[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| ExportError::Format(format!("invalid dimension '{}'", s)))
        })
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BinEdges, RunMetadata};
    use nalgebra::DVector;
    use ndarray::array;

    #[test]
    fn test_header_is_aligned() {
        for shape in [vec![3usize], vec![27_999, 800], vec![1, 1]] {
            let header = header_text(&shape);
            assert_eq!((10 + header.len()) % 64, 0, "shape {:?}", shape);
            assert!(header.ends_with('\n'));
        }
        assert!(header_text(&[5]).contains("'shape': (5,)"));
        assert!(header_text(&[2, 3]).contains("'shape': (2, 3)"));
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.npy");
        write_npy_grid(array![[1.0, 2.0], [3.0, f64::NAN]].view(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..6], MAGIC);
        assert_eq!(&bytes[6..8], &[1, 0]);
        let header_length = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
        assert_eq!((10 + header_length) % 64, 0);
        assert_eq!(bytes.len(), 10 + header_length + 4 * 8);

        let data = &bytes[10 + header_length..];
        assert_eq!(&data[..8], &1.0f64.to_le_bytes());
        assert_eq!(&data[16..24], &3.0f64.to_le_bytes());
    }

    #[test]
    fn test_read_back_preserves_nan_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.npy");
        let grid = array![[1.5, f64::NAN, -2.0], [0.0, 4.0, 1e-300]];
        write_npy_grid(grid.view(), &path).unwrap();

        let read = read_npy_grid(&path).unwrap();
        assert_eq!(read.dim(), (2, 3));
        assert!(read[[0, 1]].is_nan());
        assert_eq!(read[[0, 2]], -2.0);
        assert_eq!(read[[1, 2]], 1e-300);
    }

    #[test]
    fn test_transposed_view_written_in_logical_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.npy");
        let grid = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        write_npy_grid(grid.t(), &path).unwrap();

        let read = read_npy_grid(&path).unwrap();
        assert_eq!(read, array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]);
    }

    #[test]
    fn test_save_density_uses_fixed_name() {
        let edges = BinEdges::uniform(0.0, 1.0, 2).unwrap();
        let histogram = DensityHistogram {
            grid: array![[1.0, f64::NAN], [2.0, 3.0]],
            edges,
            parameters: DVector::from_vec(vec![0.3, 0.4]),
            raw_total: 6.0,
            rejected: 0,
            metadata: RunMetadata::new(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = save_density(&histogram, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), DENSITY_ARRAY_FILE);
        assert_eq!(read_npy_grid(&path).unwrap().dim(), (2, 2));
    }

    #[test]
    fn test_lyapunov_is_one_dimensional() {
        let exponent = LyapunovExponent {
            parameters: DVector::from_vec(vec![1.0, 2.0, 3.0]),
            exponents: DVector::from_vec(vec![-0.5, f64::NEG_INFINITY, 0.2]),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyapunov.npy");
        NpyExporter.export_lyapunov(&exponent, path.to_str().unwrap()).unwrap();

        // the grid reader only accepts 2-D arrays
        match read_npy_grid(&path) {
            Err(ExportError::ShapeMismatch { found, .. }) => assert_eq!(found, "1-D array"),
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    /// Preamble and header of a version 1.0 file declaring `shape`, without data
    fn header_only(shape: &[usize]) -> Vec<u8> {
        let header = header_text(shape);
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[1, 0]);
        bytes.extend_from_slice(&(header.len() as u16).to_le_bytes());
        bytes.extend_from_slice(header.as_bytes());
        bytes
    }

    #[test]
    fn test_rejects_oversized_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.npy");
        std::fs::write(&path, header_only(&[1 << 32, 1 << 32])).unwrap();

        match read_npy_grid(&path) {
            Err(ExportError::Format(message)) => assert!(message.contains("too large"), "{}", message),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.npy");
        std::fs::write(&path, header_only(&[100_000, 100_000])).unwrap();

        match read_npy_grid(&path) {
            Err(ExportError::ShapeMismatch { found, .. }) => assert_eq!(found, "0 bytes"),
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_truncated_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.npy");
        let mut bytes = header_only(&[2, 2]);
        bytes.truncate(20);
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(read_npy_grid(&path), Err(ExportError::Format(_))));
    }

    #[test]
    fn test_rejects_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.npy");
        std::fs::write(&path, b"not an array at all").unwrap();
        assert!(matches!(read_npy_grid(&path), Err(ExportError::Format(_))));

        let missing = dir.path().join("missing.npy");
        assert!(matches!(read_npy_grid(&missing), Err(ExportError::Io(_))));
    }
}
