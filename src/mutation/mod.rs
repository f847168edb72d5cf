mod row_mutation;

pub use row_mutation::RowMutation;
