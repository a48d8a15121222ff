macro_rules! droppable {
    () => {
        #[derive(Debug, Eq, Ord, PartialEq, PartialOrd)]
        struct Droppable(i32);
        impl Droppable {
            fn new(value: i32) -> Self {
                unsafe {
                    COUNT += 1;
                }
                Droppable(value)
            }

            fn count() -> i32 {
                unsafe { COUNT }
            }
        }
        impl Clone for Droppable {
            fn clone(&self) -> Self {
                Droppable::new(self.0)
            }
        }
        impl Default for Droppable {
            fn default() -> Self {
                Droppable::new(0)
            }
        }
        impl Drop for Droppable {
            fn drop(&mut self) {
                unsafe {
                    COUNT -= 1;
                }
            }
        }

        static mut COUNT: i32 = 0;
    };
}
