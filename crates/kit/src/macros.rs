/// Helper macro to build an input processor out of another one.
///
/// The block receives the already parsed value and returns
/// `anyhow::Result<Self>`. A rejected value is reported as
/// [`ErrorKind::Custom`] spanning the input it was parsed from.
///
/// ```
/// use kit::prelude::*;
///
/// struct Digit(u8);
///
/// kit::from_input! {
///     |W(v): W<&str>| -> Digit {
///         match v.as_bytes() {
///             &[b @ b'0'..=b'9'] => Ok(Digit(b - b'0')),
///             _ => bail!("not a digit `{v}`"),
///         }
///     }
/// }
///
/// let mut input = Input::new(b"7 x");
/// assert_eq!(input.next::<Digit>()?.0, 7);
/// assert!(input.next::<Digit>().is_err());
/// # Ok::<_, kit::input::InputError>(())
/// ```
///
/// [`ErrorKind::Custom`]: crate::input::ErrorKind::Custom
#[macro_export]
macro_rules! from_input {
    (|$($value:ident)? $(($pat:pat))?: $ty:ty| -> $($rest:tt)*) => {
        $crate::from_input!(|[$($value)? $(($pat))?]: $ty| -> $($rest)*);
    };

    (|[$($value:tt)*]: $ty:ty| -> $out:ident $block:block) => {
        impl<'a> $crate::input::FromInput<'a> for $out {
            #[inline]
            fn try_from_input(
                p: &mut $crate::input::Input<'a>,
            ) -> ::core::result::Result<Option<Self>, $crate::input::InputError> {
                p.skip_whitespace();
                let original = *p;

                let Some(value) = <$ty as $crate::input::FromInput<'a>>::try_from_input(p)? else {
                    return Ok(None);
                };

                match (|$($value)*: $ty| -> ::core::result::Result<$out, $crate::macro_support::Error> {
                    $block
                })(value)
                {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        let span = original.index()..p.index();
                        *p = original;
                        Err($crate::input::InputError::custom(span, e))
                    }
                }
            }
        }
    };
}
