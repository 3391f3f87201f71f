use crate::input::Input;

/// Iterator over the lines of an [Input].
///
/// See [Input::lines].
pub struct Lines<'a> {
    input: Input<'a>,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(input: Input<'a>) -> Self {
        Self { input }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Input<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.input.split_line()
    }
}
