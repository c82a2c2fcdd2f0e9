use crate::runtime::{Publisher, Subscription, Timer};
use std::{rc::Rc, sync::Arc};

/// Capability of an endpoint to report how many peers it is connected to.
pub trait NumConnections {
    /// Connected peers of the opposite role, read live on every call.
    fn num_connections(&self) -> usize {
        0
    }
}

impl<T> NumConnections for Publisher<T> {
    fn num_connections(&self) -> usize {
        self.get_subscription_count()
    }
}

impl<T: 'static> NumConnections for Subscription<T> {
    fn num_connections(&self) -> usize {
        self.get_publisher_count()
    }
}

impl NumConnections for Timer {}

impl<T> NumConnections for &T
where
    T: NumConnections + ?Sized,
{
    fn num_connections(&self) -> usize {
        (**self).num_connections()
    }
}

impl<T> NumConnections for Box<T>
where
    T: NumConnections + ?Sized,
{
    fn num_connections(&self) -> usize {
        (**self).num_connections()
    }
}

impl<T> NumConnections for Rc<T>
where
    T: NumConnections + ?Sized,
{
    fn num_connections(&self) -> usize {
        (**self).num_connections()
    }
}

impl<T> NumConnections for Arc<T>
where
    T: NumConnections + ?Sized,
{
    fn num_connections(&self) -> usize {
        (**self).num_connections()
    }
}

/// Number of peers of the opposite role connected to `endpoint`.
pub fn get_num_connections<E>(endpoint: &E) -> usize
where
    E: NumConnections + ?Sized,
{
    endpoint.num_connections()
}

#[doc(hidden)]
pub struct Subject<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait ViaCountingRule {
    fn resolve(&self) -> usize;
}

impl<T> ViaCountingRule for &Subject<'_, T>
where
    T: NumConnections + ?Sized,
{
    fn resolve(&self) -> usize {
        NumConnections::num_connections(self.0)
    }
}

#[doc(hidden)]
pub trait ViaZeroDefault {
    fn resolve(&self) -> usize;
}

impl<T: ?Sized> ViaZeroDefault for Subject<'_, T> {
    fn resolve(&self) -> usize {
        0
    }
}

/// Counts the peers of any value: endpoints use their counting rule, values
/// of every other type count as zero.
///
/// ```
/// use connection_counter::num_connections;
///
/// assert_eq!(num_connections!(42_i32), 0);
/// assert_eq!(num_connections!("not an endpoint"), 0);
/// ```
#[macro_export]
macro_rules! num_connections {
    ($endpoint:expr) => {{
        #[allow(unused_imports)]
        use $crate::connections::{ViaCountingRule as _, ViaZeroDefault as _};
        (&&$crate::connections::Subject(&$endpoint)).resolve()
    }};
}
