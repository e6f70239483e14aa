/*!
 * Value Stream Generation
 * Reproducible randomized streams for pre-population and operation mixes
 */

mod rand_values;

pub use rand_values::RandValues;
