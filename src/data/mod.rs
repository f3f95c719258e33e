/// Data layer: matrix model, loading, selection and reshaping.
///
/// Architecture:
/// ```text
///  .tsv / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Matrix (label → index maps)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  row labels (single / file), column groups (regex prefix)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  wide rows × group columns → LongTable
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod reshape;
pub mod select;
