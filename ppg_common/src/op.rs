/// Implements the standard arithmetic operator traits for a single-field tuple struct by delegating
/// to the inner type.
#[macro_export]
macro_rules! op {
    (binary $t:ty, $trait:ident, $method:ident) => {
        impl $trait for $t {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                Self($trait::$method(self.0, rhs.0))
            }
        }
    };
    (inplace $t:ty, $trait:ident, $method:ident) => {
        impl $trait for $t {
            fn $method(&mut self, rhs: Self) {
                $trait::$method(&mut self.0, rhs.0)
            }
        }
    };
    (unary $t:ty, $trait:ident, $method:ident) => {
        impl $trait for $t {
            type Output = Self;

            fn $method(self) -> Self::Output {
                Self($trait::$method(self.0))
            }
        }
    };
}
