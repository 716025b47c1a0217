pub mod configuration;
pub mod configurationerror;

pub mod envelope {
    pub mod direction;
    pub mod envelope;
    pub mod envelopecursor;
    pub mod envelopeerror;
    pub mod envelopepart;
    pub mod envelopeprofile;
    pub mod maxenvelopebuilder;

    pub mod part {
        pub mod envelopepartbuilder;
        pub mod constrainedenvelopepartbuilder;

        pub mod constraints {
            pub mod envelopepartconstraint;
            pub mod speedconstraint;
            pub mod positionconstraint;
            pub mod envelopeconstraint;
        }
    }
}

pub mod envelopesim {
    pub mod physicsrollingstock;
    pub mod physicspath;
    pub mod envelopesimcontext;
    pub mod trainphysicsintegrator;
    pub mod overlays;
    pub mod rollingstock;
    pub mod gradientpath;
}

pub mod ertms {
    pub mod etcs {
        pub mod fixedvaluedata;
        pub mod nationalvalues;
        pub mod brakingcurvetype;
        pub mod trainpath;
        pub mod brakingcurves;
    }
}

pub mod math {
    pub mod point2d;
    pub mod rangemap;
}
