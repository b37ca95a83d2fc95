mod approx;
mod proptest_props;
