#[cfg(feature = "tracing")]
macro_rules! gtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "hscroller_gesture", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! gtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! gdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "hscroller_gesture", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! gdebug {
    ($($tt:tt)*) => {};
}
