use crate::ConstructImpl;

impl<TTerm> ConstructImpl<TTerm> for () {
    fn null() -> Self {}

    fn terminal(_: &TTerm) -> Self {}
}
