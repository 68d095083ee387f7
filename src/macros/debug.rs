#[cfg(feature = "debug")]
macro_rules! trace {
    ($( $args:tt )*) => { tracing::trace!( $( $args )* ); }
}

#[cfg(not(feature = "debug"))]
macro_rules! trace {
    ($( $args:tt )*) => {};
}
