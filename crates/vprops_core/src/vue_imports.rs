use crate::PropsAtom;
use flagset::{flags, FlagSet};
use strum_macros::{AsRefStr, EnumString, IntoStaticStr};

flags! {
    /// Runtime helpers the generated props declaration refers to
    #[derive(AsRefStr, EnumString, IntoStaticStr)]
    pub enum VueImports: u8 {
        #[strum(serialize = "_mergeDefaults")]
        MergeDefaults,
        #[strum(serialize = "_mergeModels")]
        MergeModels,
    }
}

impl VueImports {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    #[inline]
    pub fn as_atom(self) -> PropsAtom {
        self.as_str().into()
    }
}

pub type VueImportsSet = FlagSet<VueImports>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_names_helpers() {
        assert_eq!(VueImports::MergeDefaults.as_str(), "_mergeDefaults");
        assert_eq!(VueImports::MergeModels.as_atom(), "_mergeModels");

        let set: VueImportsSet = VueImports::MergeModels | VueImports::MergeDefaults;
        assert!(set.contains(VueImports::MergeDefaults));
    }
}
