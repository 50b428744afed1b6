#[macro_export]
macro_rules! opt {
    (, $default:ident) => {
        $default
    };
    ($value:expr, $default:ident) => {
        $value
    };
}

#[macro_export]
macro_rules! params_internal {
    ($vec:ident, required, $key:expr, $val:expr) => {
        $vec.push(($key, $val.to_string()));
    };
    ($vec:ident, optional, $key:expr, $val:expr) => {
        if let Some(ref v) = $val {
            $vec.push(($key, v.to_string()));
        }
    };
}

/// Build the query parameters of a request as `(key, value)` string pairs, in declaration order.
/// The key is the identifier itself, so it must match the name the endpoint expects.
/// ```
/// use hashtag_util::build_params;
///
/// let q = "#rust";
/// let count = 100;
/// let result_type: Option<&str> = None;
/// let params = build_params! {
///     required q,
///     required count => count,
///     optional result_type,
/// };
/// assert_eq!(params, vec![("q".to_string(), "#rust".to_string()), ("count".to_string(), "100".to_string())]);
/// ```
#[macro_export]
macro_rules! build_params {
    (
        $(
            $kind:ident $name:ident $( => $val:expr )?
        ),+ $(,)?
    ) => {
        {
            let mut params: Vec<(String, String)> = Vec::new();
            $(
                $crate::params_internal!(
                    params,
                    $kind,
                    stringify!($name).to_string(),
                    $crate::opt!($( $val )?, $name)
                );
            )+
            params
        }
    };
}
